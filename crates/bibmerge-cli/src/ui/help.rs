pub fn help_lines() -> &'static [&'static str] {
    &[
        "Keys",
        "Up/Down or j/k move between fields",
        "Left/Right or h/l take the left/right value",
        "L / R take every left / right value",
        "e or Enter edit the merged value (Enter keeps, Esc drops)",
        "g merge / unmerge groups",
        "d plain text / diff | v unified / split | c words / chars",
        "Ctrl+S accept merge | Esc or Ctrl+Q cancel",
        "? close this help",
    ]
}

pub fn help_text() -> String {
    help_lines().join("\n")
}
