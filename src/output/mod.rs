pub mod formatter;

pub use formatter::{
    format_json, format_percentage, format_progress, format_question, format_question_list,
    format_report, format_score, should_use_colors,
};
