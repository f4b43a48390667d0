use jiff::Timestamp;

/// Format a timestamp into a short relative string like "2d ago",
/// "3h ago", "15m ago", or "just now".
pub fn format_relative(timestamp: &Timestamp) -> String {
    let now_secs = Timestamp::now().as_second();
    let ts = timestamp.as_second();

    // Future or clock-skewed timestamps read as just now
    if now_secs <= ts {
        return "just now".to_string();
    }

    let delta = now_secs - ts;
    let days = delta / 86_400;
    if days > 0 {
        return format!("{}d ago", days);
    }

    let hours = delta / 3_600;
    if hours > 0 {
        return format!("{}h ago", hours);
    }

    let minutes = delta / 60;
    if minutes > 0 {
        return format!("{}m ago", minutes);
    }

    "just now".to_string()
}

/// Calendar date for detail views, day first like the original client
/// displayed it.
pub fn format_date(timestamp: &Timestamp) -> String {
    timestamp.strftime("%d/%m/%Y").to_string()
}
