use chrono::{DateTime, Utc};

/// Formats a throughput figure the way the cluster table shows it, e.g. `1.5 KB/s`.
pub fn human_rate(bytes_per_sec: f64) -> String {
    if !bytes_per_sec.is_finite() || bytes_per_sec <= 0.0 {
        return "0 B/s".to_string();
    }
    const UNIT: f64 = 1024.0;
    if bytes_per_sec < UNIT {
        return format!("{:.0} B/s", bytes_per_sec);
    }
    let suffixes = ["KB/s", "MB/s", "GB/s", "TB/s"];
    let mut value = bytes_per_sec / UNIT;
    let mut exp = 0;
    while value >= UNIT && exp < suffixes.len() - 1 {
        value /= UNIT;
        exp += 1;
    }
    format!("{:.1} {}", value, suffixes[exp])
}

pub fn human_time(t: Option<DateTime<Utc>>) -> String {
    let t = match t {
        Some(t) => t,
        None => return "never".to_string(),
    };

    let secs = (Utc::now() - t).num_seconds();

    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        plural(secs / 60, "minute")
    } else if secs < 86400 {
        plural(secs / 3600, "hour")
    } else {
        t.format("%b %e, %Y %H:%M").to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Joins `base` with percent-encoded `segments`.
pub fn join_path(base: &str, segments: &[&str]) -> String {
    let mut out = base.trim_end_matches('/').to_string();
    for s in segments {
        out.push('/');
        out.push_str(&urlencoding::encode(s));
    }
    out
}
