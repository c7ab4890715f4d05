use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};
use std::fmt::Display;
use std::str::FromStr;

pub fn prompt(prompt: &str) -> Result<String> {
    Ok(Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

/// Like [prompt], but an empty answer is allowed and returned as is.
pub fn prompt_allow_empty(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Asks until the answer parses as `T` and passes `validate`.
pub fn prompt_parsed<T>(
    prompt: &str,
    default: T,
    validate: impl Fn(&T) -> Result<(), String>,
) -> Result<T>
where
    T: Clone + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    Ok(Input::<T>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .validate_with(|value: &T| validate(value))
        .interact_text()?)
}

pub fn select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?)
}

/// Opens `content` in the user's editor. Returns `None` if the file wasn't saved.
pub fn edit(content: &str) -> Result<Option<String>> {
    Ok(Editor::new().extension(".csv").edit(content)?)
}
