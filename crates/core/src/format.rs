use crate::store::SharedStore;

/// Fixed reply when a request produced nothing at all.
pub const NO_OUTPUT_MESSAGE: &str = "No specific result was produced for this request.";

/// Render a finished store as human-readable markdown.
///
/// Exactly one section is rendered, chosen by fixed precedence: math
/// solution, insights, generated code, summary, the flow's status line, the
/// last error, then a fixed no-output message.
pub fn format_store_readable(store: &SharedStore) -> String {
    if let Some(solution) = &store.math_solution {
        let mut output = String::new();
        output.push_str("## Math Solution\n\n");
        output.push_str(solution);
        output.push('\n');
        return output;
    }

    if let Some(insights) = &store.insights {
        let mut output = String::new();
        output.push_str("## Insights\n\n");
        output.push_str(insights);
        output.push('\n');
        return output;
    }

    if let Some(code) = &store.generated_code {
        let mut output = String::new();
        output.push_str("## Generated Code\n\n");
        output.push_str("```\n");
        output.push_str(code);
        output.push_str("\n```\n");
        return output;
    }

    if let Some(summary) = &store.summary {
        let mut output = String::new();
        output.push_str("## Summary\n\n");
        output.push_str(summary);
        output.push('\n');
        return output;
    }

    if let Some(final_result) = &store.final_result {
        return format!("{}\n", final_result);
    }

    if let Some(error) = &store.error {
        return format!("An error occurred: {}\n", error);
    }

    format!("{}\n", NO_OUTPUT_MESSAGE)
}
