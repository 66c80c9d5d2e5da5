//! HTML rendering of the view state.

use crate::models::User;
use crate::presentation::{FormState, Level, SortDirection, ViewState};
use crate::validation::Field;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn disabled(flag: bool) -> &'static str {
    if flag {
        " disabled"
    } else {
        ""
    }
}

pub fn render_page(view: &ViewState) -> String {
    let loading = view.is_loading();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    // Poll until the pending operation settles
    if loading {
        html.push_str("<meta http-equiv=\"refresh\" content=\"1\">\n");
    }
    html.push_str("<title>User Registry</title>\n</head>\n<body>\n<main>\n");

    html.push_str(&render_header(view));
    html.push_str(&render_toolbar(view));
    if let Some(form) = view.form() {
        html.push_str(&render_form(form, loading));
    }
    html.push_str(&render_list(&view.visible_users(), loading));
    if view.confirming_delete().is_some() {
        html.push_str(&render_confirm_dialog(loading));
    }
    html.push_str(&render_notifications(view));

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_header(view: &ViewState) -> String {
    let label = match view.sort().direction {
        SortDirection::Asc => "Sort Z-A",
        SortDirection::Desc => "Sort A-Z",
    };
    format!(
        "<header>\n<h1>User Registry</h1>\n\
         <form method=\"post\" action=\"/sort\"><button type=\"submit\" title=\"{label}\">{label}</button></form>\n\
         </header>\n"
    )
}

fn render_toolbar(view: &ViewState) -> String {
    let off = disabled(view.is_loading());
    format!(
        "<section class=\"toolbar\">\n\
         <form method=\"post\" action=\"/search\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search users\"{off}>\
         <button type=\"submit\"{off}>Search</button></form>\n\
         <form method=\"post\" action=\"/users/new\"><button type=\"submit\"{off}>New user</button></form>\n\
         </section>\n",
        escape(view.search())
    )
}

fn field_error(form: &FormState, field: Field) -> String {
    form.errors
        .message_for(field)
        .map(|message| format!("<p class=\"field-error\">{}</p>", escape(message)))
        .unwrap_or_default()
}

fn render_form(form: &FormState, loading: bool) -> String {
    let off = disabled(loading);
    let email_off = disabled(loading || !form.props.email_editable);
    format!(
        "<form class=\"user-form\" method=\"post\" action=\"/form/submit\" novalidate>\n\
         <label>Full name <input type=\"text\" name=\"name\" value=\"{name}\"{off}></label>\n{name_error}\
         <label>E-mail <input type=\"email\" name=\"email\" value=\"{email}\"{email_off}></label>\n{email_error}\
         <button type=\"submit\"{off}>{label}</button>\n\
         <button type=\"submit\" formaction=\"/form/cancel\"{off}>Cancel</button>\n\
         </form>\n",
        name = escape(&form.values.name),
        name_error = field_error(form, Field::Name),
        email = escape(&form.values.email),
        email_error = field_error(form, Field::Email),
        label = escape(&form.props.submit_label),
    )
}

fn render_user(user: &User, loading: bool) -> String {
    let off = disabled(loading);
    let initial = user.initial().map(String::from).unwrap_or_default();
    format!(
        "<li>\
         <span class=\"avatar\">{initial}</span>\
         <strong>{name}</strong> <small>{email}</small>\
         <form method=\"post\" action=\"/users/{id}/edit\"><button type=\"submit\"{off}>Edit</button></form>\
         <form method=\"post\" action=\"/users/{id}/delete\"><button type=\"submit\"{off}>Delete</button></form>\
         </li>\n",
        initial = escape(&initial),
        name = escape(&user.name),
        email = escape(&user.email),
        id = user.id,
    )
}

fn render_list(users: &[&User], loading: bool) -> String {
    if users.is_empty() {
        return if loading {
            "<p class=\"loading\">Loading...</p>\n".to_string()
        } else {
            "<p class=\"empty\">No users found</p>\n".to_string()
        };
    }

    let mut html = String::from("<ul class=\"users\">\n");
    for user in users {
        html.push_str(&render_user(user, loading));
    }
    html.push_str("</ul>\n");
    html
}

fn render_confirm_dialog(loading: bool) -> String {
    let off = disabled(loading);
    format!(
        "<dialog open>\n<p>Confirm deletion?</p>\n\
         <form method=\"post\" action=\"/delete/cancel\"><button type=\"submit\"{off}>Cancel</button></form>\n\
         <form method=\"post\" action=\"/delete/confirm\"><button type=\"submit\"{off}>Confirm</button></form>\n\
         </dialog>\n"
    )
}

fn render_notifications(view: &ViewState) -> String {
    if view.notifications().is_empty() {
        return String::new();
    }

    let mut html = String::from("<aside class=\"notifications\">\n");
    for notification in view.notifications().iter() {
        let class = match notification.level {
            Level::Success => "success",
            Level::Error => "error",
        };
        html.push_str(&format!(
            "<div class=\"notification {class}\">{message}\
             <form method=\"post\" action=\"/notifications/{id}/dismiss\"><button type=\"submit\">Dismiss</button></form>\
             </div>\n",
            message = escape(&notification.message),
            id = notification.id,
        ));
    }
    html.push_str("</aside>\n");
    html
}
