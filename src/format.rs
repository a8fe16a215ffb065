/// Groups digits by three with spaces: `1234567` -> `"1 234 567"`.
pub fn thousands_separators(num: u32) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// `MM:SS`, or `MM:SS.mmm` with `millis`.
pub fn format_time(seconds: f64, millis: bool) -> String {
    let seconds = seconds.max(0.0);
    if millis {
        let minutes = (seconds / 60.0).floor() as u64;
        format!("{:02}:{:06.3}", minutes, seconds % 60.0)
    } else {
        let total = seconds.round() as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}
