//! Server-rendered pages for the users family.

use service::users::domain::UserView;

/// Escape text for HTML element and attribute context.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

pub fn login_page() -> String {
    layout(
        "Login",
        r#"<h1>Login</h1>
<form action="/user" method="post">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password_user" required></label>
  <button type="submit">Sign in</button>
</form>
<p><a href="/signup">Create an account</a></p>"#,
    )
}

/// Signup form; `error` is shown above the form when a submission was rejected.
pub fn signup_page(error: Option<&str>) -> String {
    let notice = error
        .map(|msg| format!("<p class=\"error\">{}</p>\n", escape(msg)))
        .unwrap_or_default();
    layout(
        "Sign up",
        &format!(
            r#"<h1>Sign up</h1>
{notice}<form action="/data-processing" method="post">
  <label>First name <input type="text" name="firstname" required></label>
  <label>Last name <input type="text" name="lastname" required></label>
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password_user" required></label>
  <button type="submit">Register</button>
</form>
<p><a href="/">Back to login</a></p>"#
        ),
    )
}

pub fn user_page(user: &UserView) -> String {
    layout(
        "User",
        &format!(
            "<h1>Welcome, {first} {last}</h1>\n<dl>\n  <dt>Id</dt><dd>{id}</dd>\n  <dt>Username</dt><dd>{username}</dd>\n</dl>\n<p><a href=\"/\">Log out</a></p>",
            first = escape(&user.firstname),
            last = escape(&user.lastname),
            id = escape(&user.id),
            username = escape(&user.username),
        ),
    )
}

pub fn error_page(message: &str) -> String {
    layout("Error", &format!("<h1>Error</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>", escape(message)))
}
