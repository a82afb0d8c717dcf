use yaku_types::Language;

pub use yaku_config::DEFAULT_PROMPT_TEMPLATE;

pub const SOURCE_LANGUAGE_PLACEHOLDER: &str = "{source_language}";
pub const TARGET_LANGUAGE_PLACEHOLDER: &str = "{target_language}";
pub const TEXT_PLACEHOLDER: &str = "{text}";

pub const SYSTEM_PROMPT: &str =
    "You are a professional translator. Always respond with only the translation, no explanations.";

/// Substitute language names and source text into a prompt template.
///
/// The template is scanned once, left to right, so placeholder tokens that
/// appear inside the substituted values are copied through untouched.
/// Missing placeholders are simply not substituted.
pub fn render(template: &str, source: Language, target: Language, text: &str) -> String {
    let substitutions = [
        (SOURCE_LANGUAGE_PLACEHOLDER, source.display_name()),
        (TARGET_LANGUAGE_PLACEHOLDER, target.display_name()),
        (TEXT_PLACEHOLDER, text),
    ];

    let mut rendered = String::with_capacity(template.len() + text.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let tail = &rest[start..];

        match substitutions
            .iter()
            .find(|(token, _)| tail.starts_with(token))
        {
            Some((token, value)) => {
                rendered.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
