use crate::config::SortableConfig;
use crate::direction::resolve_direction;
use crate::errors::Result;
use crate::params::{LinkSpec, Title};
use crate::query::build_query_string;
use crate::render::{assemble_css_classes, build_href, IconPlacement, RenderResult};
use crate::request::{IdentityUrlResolver, RequestContext, SortState, UrlResolver};

/// Resolved title reported back to the caller when `inject_title_as` is
/// configured. Propagating it (and picking a winner when several links share
/// the key) is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedTitle {
    pub key: String,
    pub value: String,
}

/// One rendered header link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub injected_title: Option<InjectedTitle>,
}

/// Renders sortable column-header anchors against one request.
///
/// Holds the configuration, the request being served, and the injected
/// collaborators: a URL resolver and an optional title formatter. Rendering
/// is synchronous and keeps no state between calls, so one instance can
/// render every header of a table.
///
/// ```
/// use sortlink::{LinkSpec, MemoryRequest, SortableConfig, SortableLink};
///
/// let config = SortableConfig {
///     sortable_icon: "fa fa-sort".to_string(),
///     ..Default::default()
/// };
/// let request = MemoryRequest::new("/users");
/// let link = SortableLink::new(&config, &request);
///
/// let rendered = link.render(&LinkSpec::new("name")).unwrap();
/// assert_eq!(
///     rendered.html,
///     "<a href=\"/users?sort=name&direction=asc\">name</a><i class=\"fa fa-sort\"></i>"
/// );
/// ```
pub struct SortableLink<'a, R: RequestContext + ?Sized> {
    config: &'a SortableConfig,
    request: &'a R,
    url_resolver: &'a dyn UrlResolver,
    title_formatter: Option<&'a dyn Fn(&str) -> String>,
}

impl<'a, R: RequestContext + ?Sized> SortableLink<'a, R> {
    pub fn new(config: &'a SortableConfig, request: &'a R) -> Self {
        Self {
            config,
            request,
            url_resolver: &IdentityUrlResolver,
            title_formatter: None,
        }
    }

    /// Resolve final URLs through `resolver` instead of passing the
    /// path-and-query through unchanged.
    pub fn with_url_resolver(mut self, resolver: &'a dyn UrlResolver) -> Self {
        self.url_resolver = resolver;
        self
    }

    /// Format non-markup titles with `formatter`, subject to the
    /// `format_custom_titles` option.
    pub fn with_title_formatter(mut self, formatter: &'a dyn Fn(&str) -> String) -> Self {
        self.title_formatter = Some(formatter);
        self
    }

    /// Render one header anchor.
    ///
    /// Fails only when the sort key does not split cleanly on the
    /// relation-column separator.
    pub fn render(&self, spec: &LinkSpec) -> Result<Rendered> {
        let column = spec.resolved_column(&self.config.uri_relation_column_separator)?;

        let (title, trusted) = self.resolve_title(spec, &column);

        let injected_title = self
            .config
            .inject_title_as
            .as_ref()
            .map(|key| InjectedTitle {
                key: key.clone(),
                value: title.clone(),
            });

        let state = SortState::from_request(self.request, &spec.query_prefix);
        let cue = resolve_direction(&column, &spec.sort_key, &state, self.config);
        log::debug!(
            "rendering sortable link for {:?}, next direction {}",
            spec.sort_key,
            cue.next
        );

        let query_string = build_query_string(
            self.request,
            &spec.extra_query_params,
            &spec.sort_key,
            cue.next,
            &spec.query_prefix,
        );

        let css_classes = assemble_css_classes(
            &column,
            &spec.query_prefix,
            self.request,
            self.config,
            spec.anchor_attributes.get("class").map(String::as_str),
        );

        let href = build_href(
            self.request,
            self.url_resolver,
            spec.anchor_attributes.get("href").map(String::as_str),
            &query_string,
        );

        let attributes = spec
            .anchor_attributes
            .iter()
            .filter(|(key, _)| key.as_str() != "href" && key.as_str() != "class")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let (icon_class, icon_placement) = if self.config.enable_icons {
            let placement = if self.config.clickable_icon {
                IconPlacement::Inside
            } else {
                IconPlacement::Outside
            };
            (Some(cue.icon_class), placement)
        } else {
            (None, IconPlacement::Outside)
        };

        let result = RenderResult {
            href,
            css_classes,
            icon_class,
            title: if trusted {
                title
            } else {
                html_escape::encode_text(&title).into_owned()
            },
            icon_placement,
            attributes,
            icon_text_separator: self.config.icon_text_separator.clone(),
        };

        Ok(Rendered {
            html: result.to_html(),
            injected_title,
        })
    }

    /// Resolve the display title and whether it is trusted markup.
    ///
    /// A defaulted title (the column name) is always formatted; a caller
    /// text title only when `format_custom_titles` allows it; markup never.
    fn resolve_title(&self, spec: &LinkSpec, column: &str) -> (String, bool) {
        match &spec.title {
            Some(Title::Html(markup)) => (markup.clone(), true),
            Some(Title::Text(text)) => {
                if self.config.format_custom_titles {
                    (self.format_title(text), false)
                } else {
                    (text.clone(), false)
                }
            }
            None => (self.format_title(column), false),
        }
    }

    fn format_title(&self, title: &str) -> String {
        match self.title_formatter {
            Some(formatter) => formatter(title),
            None => title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_defaults_to_resolved_column() {
        let config = SortableConfig::default();
        let request = crate::request::MemoryRequest::new("/users");
        let link = SortableLink::new(&config, &request);

        let (title, trusted) = link.resolve_title(&LinkSpec::new("user.name"), "name");

        assert_eq!(title, "name");
        assert!(!trusted);
    }

    #[test]
    fn test_custom_title_skips_formatting_when_disabled() {
        let config = SortableConfig {
            format_custom_titles: false,
            ..Default::default()
        };
        let request = crate::request::MemoryRequest::new("/users");
        let upper = |title: &str| title.to_uppercase();
        let link = SortableLink::new(&config, &request).with_title_formatter(&upper);

        let (custom, _) = link.resolve_title(&LinkSpec::new("name").with_title("Name"), "name");
        // defaulted titles are still formatted
        let (defaulted, _) = link.resolve_title(&LinkSpec::new("name"), "name");

        assert_eq!(custom, "Name");
        assert_eq!(defaulted, "NAME");
    }

    #[test]
    fn test_markup_title_is_never_formatted() {
        let config = SortableConfig::default();
        let request = crate::request::MemoryRequest::new("/users");
        let upper = |title: &str| title.to_uppercase();
        let link = SortableLink::new(&config, &request).with_title_formatter(&upper);

        let spec = LinkSpec::new("name").with_title_html("<em>Name</em>");
        let (title, trusted) = link.resolve_title(&spec, "name");

        assert_eq!(title, "<em>Name</em>");
        assert!(trusted);
    }
}
