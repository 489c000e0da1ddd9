//! HTML pages served by the membership endpoints.
//!
//! Every interpolated value goes through [`html`] (element text and
//! attributes) or [`js_string`] (inline script literals).

use crate::adapters::http::html::{html, js_string};
use crate::domain::content::{PaywallReason, ProtectedContent};

const PAGE_STYLE: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: #1a1a1a;
  color: #fff;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  padding: 20px;
}
.container, .paywall { max-width: 420px; width: 100%; text-align: center; }
h1, h2 { margin-bottom: 8px; }
p { color: #aaa; margin-bottom: 20px; line-height: 1.5; }
.teaser { color: #ccc; font-style: italic; }
label { display: block; text-align: left; margin-bottom: 6px; }
input { width: 100%; padding: 12px; border-radius: 8px; border: 1px solid #444; margin-bottom: 12px; }
button, .btn {
  display: inline-block;
  padding: 12px 24px;
  background: #f48031;
  color: #fff;
  border: none;
  border-radius: 8px;
  font-weight: 600;
  text-decoration: none;
  margin: 8px;
  cursor: pointer;
}
button:hover, .btn:hover { background: #e07020; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
.btn-secondary { background: #333; border: 1px solid #444; }
.notice { background: #3a2a1a; border: 1px solid #5a4a3a; padding: 12px; border-radius: 8px; margin-bottom: 16px; font-size: 14px; }
.success { color: #7ad67a; }
.error { color: #ff7a7a; }
.footer-links { margin-top: 24px; font-size: 14px; }
a { color: #f48031; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{PAGE_STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = html(title),
    )
}

/// `GET /login`. The form posts JSON to `/login` and shows the outcome inline.
pub fn login_page(site_url: &str, tiers_url: &str, redirect: &str) -> String {
    let body = format!(
        r#"  <div class="container">
    <h1>Member Login</h1>
    <p>Enter your email to receive a magic link. No password needed!</p>
    <form id="login-form">
      <label for="email">Email address</label>
      <input type="email" id="email" name="email" required placeholder="you@example.com" autocomplete="email">
      <button type="submit" id="submit-btn">Send Magic Link</button>
    </form>
    <div id="message"></div>
    <div class="footer-links">
      <p>Looking for something else?</p>
      <a href="{tiers}" target="_blank" rel="noopener">Become a member</a>
      &nbsp;·&nbsp;
      <a href="{site}/to/news">Newsletter signup</a>
    </div>
  </div>
  <a href="{site}" class="footer-links">&larr; Back to tamm.in</a>
  <script>
    const form = document.getElementById('login-form');
    const btn = document.getElementById('submit-btn');
    const msg = document.getElementById('message');
    const redirect = {redirect};
    form.addEventListener('submit', async (e) => {{
      e.preventDefault();
      btn.disabled = true;
      btn.textContent = 'Sending...';
      msg.textContent = '';
      const email = document.getElementById('email').value;
      const show = (cls, text) => {{
        const div = document.createElement('div');
        div.className = cls;
        div.textContent = text;
        msg.replaceChildren(div);
      }};
      try {{
        const res = await fetch('/login', {{
          method: 'POST',
          headers: {{ 'Content-Type': 'application/json' }},
          body: JSON.stringify({{ email, redirect }}),
        }});
        const data = await res.json();
        if (res.ok) {{
          show('success', 'Check your email for the magic link!');
          form.style.display = 'none';
        }} else {{
          show('error', data.error || 'Something went wrong');
          btn.disabled = false;
          btn.textContent = 'Send Magic Link';
        }}
      }} catch (err) {{
        show('error', 'Network error. Please try again.');
        btn.disabled = false;
        btn.textContent = 'Send Magic Link';
      }}
    }});
  </script>"#,
        tiers = html(tiers_url),
        site = html(site_url),
        redirect = js_string(redirect),
    );
    page("Member Login - tamm.in", &body)
}

/// Magic links carry the token in the URL fragment, which never reaches the
/// server. This page moves it into the query string and reloads.
pub fn callback_fragment_page() -> String {
    page(
        "Completing login...",
        r#"  <p>Completing login...</p>
  <script>
    const params = new URLSearchParams(window.location.hash.substring(1));
    const accessToken = params.get('access_token');
    if (accessToken) {
      window.location.href = '/auth/callback?access_token=' + encodeURIComponent(accessToken);
    } else {
      document.body.innerHTML = '<p>Login failed. <a href="/login">Try again</a></p>';
    }
  </script>"#,
    )
}

pub fn paywall_page(content: &ProtectedContent, reason: &PaywallReason, tiers_url: &str) -> String {
    let notice = match reason {
        PaywallReason::Anonymous => String::new(),
        PaywallReason::NotMember { email } => format!(
            r#"<div class="notice">Your membership for {} has expired or is inactive.</div>"#,
            html(email.as_str())
        ),
        PaywallReason::TierTooLow { email, required } => format!(
            r#"<div class="notice">Your membership for {} does not include this content. It requires the {} tier.</div>"#,
            html(email.as_str()),
            html(required.as_str())
        ),
    };
    let login_label = if reason.email().is_some() {
        "Login with different email"
    } else {
        "Already a member? Login"
    };
    let login_href = format!(
        "/login?redirect={}",
        urlencoding::encode(&format!("/content/{}", content.slug))
    );

    let body = format!(
        r#"  <div class="paywall">
    <div class="lock-icon">🔒</div>
    <h2>{title}</h2>
    <p class="teaser">{teaser}</p>
    {notice}
    <p>This content is exclusive to supporters. Join to unlock full access.</p>
    <a href="{tiers}" class="btn" target="_top">Subscribe on Ko-fi</a>
    <br>
    <a href="{login}" class="btn btn-secondary" target="_top">{login_label}</a>
  </div>"#,
        title = html(&content.title),
        teaser = html(&content.teaser),
        tiers = html(tiers_url),
        login = html(&login_href),
    );
    page(&format!("{} - Member Content", content.title), &body)
}

/// Member view. `body_html` is already rendered and sanitized.
pub fn content_page(content: &ProtectedContent, body_html: &str) -> String {
    let body = format!(
        r#"  <article class="container" style="text-align: left; max-width: 720px;">
    <h1>{title}</h1>
    {body_html}
    <p class="footer-links">Thank you for being a supporter.</p>
  </article>"#,
        title = html(&content.title),
    );
    page(&content.title, &body)
}
