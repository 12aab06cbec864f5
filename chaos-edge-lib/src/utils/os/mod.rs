#[cfg(target_family = "unix")]
mod unix;

/// Hostname of the machine this process runs on.
///
/// Falls back to the `HOSTNAME` (unix) or `COMPUTERNAME` (windows)
/// environment variables and finally to `"unknown"`.
pub fn hostname() -> String {
    #[cfg(target_family = "unix")]
    if let Some(name) = self::unix::gethostname() {
        return name;
    }

    ["HOSTNAME", "COMPUTERNAME"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_owned())
}
