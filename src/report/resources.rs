// `kubectl top pod` snapshots: a header line, then one data line
// `NAME CPU(cores) MEMORY(bytes)`, e.g. `web-7d9f 250m 512Mi`.

/// CPU quantity in cores: `250m` → 0.25, `2` → 2.0.
pub fn parse_cpu_cores(s: &str) -> Option<f64> {
    let s = s.trim();
    match s.strip_suffix('m') {
        Some(millis) => millis.parse::<f64>().ok().map(|m| m / 1000.0),
        None => s.parse::<f64>().ok(),
    }
}

/// Memory quantity in MB: `128Ki` → 0.125, `512Mi` → 512, `2Gi` → 2048.
/// A bare number is taken as MB.
pub fn parse_memory_mb(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some(v) = s.strip_suffix("Ki") {
        return v.parse::<f64>().ok().map(|k| k / 1024.0);
    }
    if let Some(v) = s.strip_suffix("Mi") {
        return v.parse::<f64>().ok();
    }
    if let Some(v) = s.strip_suffix("Gi") {
        return v.parse::<f64>().ok().map(|g| g * 1024.0);
    }
    s.parse::<f64>().ok()
}

/// (cpu cores, memory MB) from the two-line text, or None when it is short or malformed.
pub fn parse_top_output(text: &str) -> Option<(f64, f64)> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let _header = lines.next()?;
    let data: Vec<&str> = lines.next()?.split_whitespace().collect();
    if data.len() < 3 {
        return None;
    }
    Some((parse_cpu_cores(data[1])?, parse_memory_mb(data[2])?))
}
