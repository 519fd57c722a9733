use crate::domain::request::HiddenField;

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

/// Renders hidden inputs the way the payment page integration guide shows them:
/// `<input type="hidden" name="N" id="N" value="V" />`, without `value` when unset.
pub fn hidden_fields(fields: &[HiddenField]) -> String {
    let mut html = String::new();
    for field in fields {
        html.push_str("<input type=\"hidden\" name=\"");
        escape_attr(field.name, &mut html);
        html.push_str("\" id=\"");
        escape_attr(field.name, &mut html);
        html.push('"');
        if let Some(value) = &field.value {
            html.push_str(" value=\"");
            escape_attr(value, &mut html);
            html.push('"');
        }
        html.push_str(" />");
    }
    html
}

/// Wraps the hidden inputs in a POST form targeting the hosted payment page.
pub fn form(action: &str, fields: &[HiddenField]) -> String {
    let mut html = String::new();
    html.push_str("<form method=\"post\" action=\"");
    escape_attr(action, &mut html);
    html.push_str("\">");
    html.push_str(&hidden_fields(fields));
    html.push_str("</form>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &'static str, value: Option<&str>) -> HiddenField {
        HiddenField {
            name,
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_hidden_field_markup() {
        let html = hidden_fields(&[
            field("merchantId", Some("1100000000")),
            field("uppCustomerDetails", None),
        ]);
        assert_eq!(
            html,
            "<input type=\"hidden\" name=\"merchantId\" id=\"merchantId\" value=\"1100000000\" />\
             <input type=\"hidden\" name=\"uppCustomerDetails\" id=\"uppCustomerDetails\" />"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let html = hidden_fields(&[field("uppCustomerName", Some("\"><script>&'"))]);
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;&amp;&#39;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_form_wrapper() {
        let html = form(
            "https://pilot.datatrans.biz/upp/jsp/upStart.jsp",
            &[field("refno", Some("ABCDEF"))],
        );
        assert!(html.starts_with(
            "<form method=\"post\" action=\"https://pilot.datatrans.biz/upp/jsp/upStart.jsp\">"
        ));
        assert!(html.ends_with("</form>"));
        assert!(html.contains("name=\"refno\""));
    }
}
