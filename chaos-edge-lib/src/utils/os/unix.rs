use rama::telemetry::tracing;

pub(super) fn gethostname() -> Option<String> {
    let mut buf = [0u8; 256];

    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        tracing::debug!(
            "gethostname failed: {}; fallback to env",
            std::io::Error::last_os_error()
        );
        return None;
    }

    let len = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..len]).into_owned();
    (!name.is_empty()).then_some(name)
}
