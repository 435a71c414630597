pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Control:
  m             Mute / unmute alerts
  s             Suppress / unsuppress alerts
  r             Refresh state now
  d             Open display view
  l             Logout

Display:
  Esc           Back to control (or quit when started as display)

Login:
  Paste the code or the whole callback URL, then Enter

General:
  ?             Toggle this help
  q / Ctrl + Q  Quit
"#
        .to_string()
    }
}
