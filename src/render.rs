use crate::config::SortableConfig;
use crate::request::{
    direction_parameter_name, sort_parameter_name, RequestContext, UrlResolver,
};

/// Where the state icon lands relative to the anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPlacement {
    /// Inside the anchor, before its closing tag, so the icon is clickable.
    Inside,
    /// Immediately after the closing tag.
    Outside,
}

/// Assembled pieces of one header anchor, ready for concatenation.
///
/// `title` is already escaped (or trusted markup); `href` has been through
/// the URL resolver. `icon_class` is `None` when icons are disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub href: String,
    pub css_classes: Vec<String>,
    pub icon_class: Option<String>,
    pub title: String,
    pub icon_placement: IconPlacement,
    /// Attributes other than `href` and `class`, in caller order.
    pub attributes: Vec<(String, String)>,
    /// Markup between the title and the icon element.
    pub icon_text_separator: String,
}

impl RenderResult {
    /// Concatenate into the final anchor string.
    ///
    /// An empty attribute value renders as a bare attribute name. The query
    /// separator `?` is always present in `href`, so no further joining
    /// happens here.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<a");

        if !self.css_classes.is_empty() {
            html.push_str(" class=\"");
            html.push_str(&self.css_classes.join(" "));
            html.push('"');
        }

        html.push_str(" href=\"");
        html.push_str(&self.href);
        html.push('"');

        for (key, value) in &self.attributes {
            html.push(' ');
            html.push_str(key);
            if !value.is_empty() {
                html.push_str("=\"");
                html.push_str(value);
                html.push('"');
            }
        }

        html.push('>');
        html.push_str(&self.title);

        let icon_markup = self
            .icon_class
            .as_ref()
            .map(|icon| format!("{}<i class=\"{icon}\"></i>", self.icon_text_separator));

        match (icon_markup, self.icon_placement) {
            (Some(icon), IconPlacement::Inside) => {
                html.push_str(&icon);
                html.push_str("</a>");
            }
            (Some(icon), IconPlacement::Outside) => {
                html.push_str("</a>");
                html.push_str(&icon);
            }
            (None, _) => html.push_str("</a>"),
        }

        html
    }
}

/// Whether the resolved column is the one named by the ambient
/// `{prefix}sort` parameter.
///
/// This compares the resolved column; the direction toggle in
/// [`resolve_direction`](crate::direction::resolve_direction) compares the
/// raw sort key. The two checks are independent.
pub(crate) fn is_active_column<R: RequestContext + ?Sized>(
    column: &str,
    prefix: &str,
    request: &R,
) -> bool {
    let sort_name = sort_parameter_name(prefix);
    request.has(&sort_name) && request.get(&sort_name) == Some(column)
}

/// Build the ordered class list for the anchor.
///
/// Order: global anchor class, active-state class, direction class, then
/// caller-supplied tokens split on single spaces. Nothing is deduplicated.
pub(crate) fn assemble_css_classes<R: RequestContext + ?Sized>(
    column: &str,
    prefix: &str,
    request: &R,
    config: &SortableConfig,
    caller_class: Option<&str>,
) -> Vec<String> {
    let mut classes = Vec::new();

    if let Some(anchor_class) = &config.anchor_class {
        classes.push(anchor_class.clone());
    }

    if is_active_column(column, prefix, request) {
        if let Some(active_class) = &config.active_anchor_class {
            classes.push(active_class.clone());
        }

        if let Some(class_prefix) = &config.direction_anchor_class_prefix {
            let suffix = if request.get(&direction_parameter_name(prefix)) == Some("asc") {
                &config.asc_suffix
            } else {
                &config.desc_suffix
            };
            classes.push(format!("{class_prefix}{suffix}"));
        }
    }

    if let Some(caller_class) = caller_class {
        classes.extend(caller_class.split(' ').map(str::to_owned));
    }

    classes
}

/// Resolve the link base and attach the query string.
///
/// A caller-supplied `href` attribute replaces the request path verbatim.
/// The `?` is appended even when the query string is empty.
pub(crate) fn build_href<R: RequestContext + ?Sized, U: UrlResolver + ?Sized>(
    request: &R,
    resolver: &U,
    anchor_href: Option<&str>,
    query_string: &str,
) -> String {
    let base = anchor_href.unwrap_or_else(|| request.path());
    resolver.resolve(&format!("{base}?{query_string}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{IdentityUrlResolver, MemoryRequest};
    use pretty_assertions::assert_eq;

    fn bare_result() -> RenderResult {
        RenderResult {
            href: "/users?sort=name&direction=asc".to_string(),
            css_classes: Vec::new(),
            icon_class: None,
            title: "name".to_string(),
            icon_placement: IconPlacement::Outside,
            attributes: Vec::new(),
            icon_text_separator: String::new(),
        }
    }

    #[test]
    fn test_minimal_anchor() {
        assert_eq!(
            bare_result().to_html(),
            "<a href=\"/users?sort=name&direction=asc\">name</a>"
        );
    }

    #[test]
    fn test_icon_outside_closes_anchor_first() {
        let result = RenderResult {
            icon_class: Some("fa fa-sort".to_string()),
            icon_text_separator: " ".to_string(),
            ..bare_result()
        };

        assert_eq!(
            result.to_html(),
            "<a href=\"/users?sort=name&direction=asc\">name</a> <i class=\"fa fa-sort\"></i>"
        );
    }

    #[test]
    fn test_icon_inside_stays_within_anchor() {
        let result = RenderResult {
            icon_class: Some("fa fa-sort".to_string()),
            icon_placement: IconPlacement::Inside,
            icon_text_separator: " ".to_string(),
            ..bare_result()
        };

        assert_eq!(
            result.to_html(),
            "<a href=\"/users?sort=name&direction=asc\">name <i class=\"fa fa-sort\"></i></a>"
        );
    }

    #[test]
    fn test_disabled_icon_omits_separator_too() {
        let result = RenderResult {
            icon_text_separator: " ".to_string(),
            ..bare_result()
        };

        assert_eq!(
            result.to_html(),
            "<a href=\"/users?sort=name&direction=asc\">name</a>"
        );
    }

    #[test]
    fn test_attributes_render_in_order_with_bare_empty_values() {
        let result = RenderResult {
            attributes: vec![
                ("rel".to_string(), "nofollow".to_string()),
                ("data-sortable".to_string(), String::new()),
                ("id".to_string(), "name-header".to_string()),
            ],
            ..bare_result()
        };

        assert_eq!(
            result.to_html(),
            "<a href=\"/users?sort=name&direction=asc\" rel=\"nofollow\" data-sortable id=\"name-header\">name</a>"
        );
    }

    #[test]
    fn test_class_attribute_before_href() {
        let result = RenderResult {
            css_classes: vec!["sortable".to_string(), "active".to_string()],
            ..bare_result()
        };

        assert_eq!(
            result.to_html(),
            "<a class=\"sortable active\" href=\"/users?sort=name&direction=asc\">name</a>"
        );
    }

    fn styled_config() -> SortableConfig {
        SortableConfig {
            anchor_class: Some("sortable".to_string()),
            active_anchor_class: Some("active".to_string()),
            direction_anchor_class_prefix: Some("dir".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_class_order_inactive() {
        let request = MemoryRequest::new("/users");

        let classes = assemble_css_classes("name", "", &request, &styled_config(), Some("a b"));

        assert_eq!(classes, ["sortable", "a", "b"]);
    }

    #[test]
    fn test_class_order_active_ascending() {
        let request = MemoryRequest::new("/users")
            .with_param("sort", "name")
            .with_param("direction", "asc");

        let classes = assemble_css_classes("name", "", &request, &styled_config(), None);

        assert_eq!(classes, ["sortable", "active", "dir-asc"]);
    }

    #[test]
    fn test_direction_class_defaults_to_desc_suffix() {
        // active column with an unrecognized direction still gets a class
        let request = MemoryRequest::new("/users")
            .with_param("sort", "name")
            .with_param("direction", "sideways");

        let classes = assemble_css_classes("name", "", &request, &styled_config(), None);

        assert_eq!(classes, ["sortable", "active", "dir-desc"]);
    }

    #[test]
    fn test_active_check_uses_resolved_column() {
        // ambient sort holds the raw relation-prefixed key, which is not
        // the resolved column, so the anchor is not styled active
        let request = MemoryRequest::new("/users")
            .with_param("sort", "user.name")
            .with_param("direction", "asc");

        assert!(!is_active_column("name", "", &request));
        assert!(is_active_column("name", "", &MemoryRequest::new("/u").with_param("sort", "name")));
    }

    #[test]
    fn test_caller_classes_not_deduplicated() {
        let request = MemoryRequest::new("/users");
        let config = SortableConfig {
            anchor_class: Some("sortable".to_string()),
            ..Default::default()
        };

        let classes = assemble_css_classes("name", "", &request, &config, Some("sortable"));

        assert_eq!(classes, ["sortable", "sortable"]);
    }

    #[test]
    fn test_href_from_request_path() {
        let request = MemoryRequest::new("/users");

        let href = build_href(&request, &IdentityUrlResolver, None, "sort=name&direction=asc");

        assert_eq!(href, "/users?sort=name&direction=asc");
    }

    #[test]
    fn test_href_attribute_overrides_path() {
        let request = MemoryRequest::new("/users");

        let href = build_href(
            &request,
            &IdentityUrlResolver,
            Some("/people"),
            "sort=name&direction=asc",
        );

        assert_eq!(href, "/people?sort=name&direction=asc");
    }

    #[test]
    fn test_href_keeps_question_mark_on_empty_query() {
        let request = MemoryRequest::new("/users");

        let href = build_href(&request, &IdentityUrlResolver, None, "");

        assert_eq!(href, "/users?");
    }
}
