//! Global CSS for the TrapiHaus shell.

pub const GLOBAL_STYLES: &str = r#"
:root {
  --bg: #FFFFFF;
  --text: #11181C;
  --muted: #8B96A3;
  --primary: #357CCB;
  --divider: #E8ECF0;
  --tab-inactive: #9AA3AD;
  --danger: #D64545;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: -apple-system, "Segoe UI", Roboto, sans-serif;
}

.auth-screen, .screen { padding: 24px 20px 120px; }
.auth-title, .screen-title { font-size: 32px; font-weight: 800; line-height: 1.2; }

.auth-form { display: flex; flex-direction: column; gap: 14px; margin-top: 24px; }
.auth-form input {
  padding: 14px 16px;
  border: 1px solid var(--divider);
  border-radius: 12px;
  font-size: 16px;
}

.btn-primary {
  padding: 16px;
  border: none;
  border-radius: 28px;
  background: var(--primary);
  color: #FFFFFF;
  font-size: 16px;
  font-weight: 700;
  cursor: pointer;
}
.btn-primary:disabled { opacity: 0.5; cursor: default; }

.link { color: var(--primary); font-weight: 600; text-decoration: none; }
.muted { color: var(--muted); }
.error-text { color: var(--danger); font-weight: 600; }

.social-row { display: flex; flex-wrap: wrap; gap: 12px; justify-content: center; margin: 24px 0; }
.social-row .muted { width: 100%; text-align: center; }
.social-button {
  padding: 10px 18px;
  border: 1px solid var(--divider);
  border-radius: 12px;
  background: var(--bg);
}

.listing-card {
  display: block;
  padding: 20px;
  border-radius: 16px;
  border: 1px solid var(--divider);
  color: var(--text);
  text-decoration: none;
  font-weight: 700;
}

.tab-bar {
  position: fixed;
  bottom: 0;
  left: 0;
  right: 0;
  height: 86px;
  display: flex;
  justify-content: space-around;
  padding: 8px 0 18px;
  background: var(--bg);
  border-top: 1px solid #EEF1F4;
}
.tab-item { color: var(--tab-inactive); font-size: 12px; font-weight: 700; text-decoration: none; }
.tab-item.active { color: var(--primary); }
"#;
