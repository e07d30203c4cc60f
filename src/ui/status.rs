use crate::app::{Model, ToastLevel};

pub fn header_line(model: &Model) -> String {
    let name = model
        .document
        .file_name()
        .or_else(|| model.document.title())
        .unwrap_or("untitled");
    let size = if model.document.is_empty() {
        "empty".to_string()
    } else {
        format!("{} chars", model.document.source().chars().count())
    };
    let lock_indicator = if model.active_password().is_some() {
        " [locked]"
    } else {
        ""
    };
    format!("mdshare  {name}  [{size}]{lock_indicator}  ?:help")
}

pub fn toast_line(model: &Model) -> Option<String> {
    let toast = model.toast()?;
    let prefix = match toast.level {
        ToastLevel::Info => "",
        ToastLevel::Warning => "warning: ",
        ToastLevel::Error => "error: ",
    };
    Some(format!("{prefix}{}", toast.message))
}
