//! Prompt text and reply parsing

pub fn summary_prompt(report_data: &str) -> String {
    format!(
        "You are an expert financial analyst. Please provide a concise summary of the \
         following petty cash report data, highlighting key trends and insights:\n\n{}",
        report_data
    )
}

pub fn category_prompt(description: &str, vendor: &str) -> String {
    format!(
        "You are an expert in categorizing transactions for petty cash management.\n\
         Given the transaction description and vendor, suggest relevant categories for the transaction.\n\
         Return the suggested categories as an array of strings.\n\
         Description: {}\n\
         Vendor: {}\n\
         Categories:",
        description, vendor
    )
}

/// Read a category list from a reply
///
/// A JSON array of strings anywhere in the reply wins; otherwise the text is
/// split on commas and newlines, dropping list markers and quotes.
pub fn parse_category_list(reply: &str) -> Vec<String> {
    if let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) {
        if start < end {
            if let Ok(items) = serde_json::from_str::<Vec<String>>(&reply[start..=end]) {
                return clean(items);
            }
        }
    }

    clean(
        reply
            .split(|c| c == ',' || c == '\n')
            .map(|item| {
                strip_list_marker(item)
                    .trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
                    .to_string()
            })
            .collect(),
    )
}

/// Drop a leading `-`, `*` or `1. ` marker; digits that start a name stay
fn strip_list_marker(item: &str) -> &str {
    let item = item.trim();
    if let Some(rest) = item.strip_prefix(['-', '*']) {
        return rest.trim_start();
    }

    let rest = item.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < item.len() {
        if let Some(after_dot) = rest.strip_prefix('.') {
            if after_dot.starts_with(char::is_whitespace) {
                return after_dot.trim_start();
            }
        }
    }
    item
}

fn clean(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.trim().to_string();
        if !item.is_empty() && !out.iter().any(|seen| seen.eq_ignore_ascii_case(&item)) {
            out.push(item);
        }
    }
    out
}
