use bytesize::ByteSize;

/// Binary units, e.g. `3.0 MiB`.
pub fn human_bytes(b: u64) -> String {
    ByteSize::b(b).to_string_as(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(human_bytes(512), "512 B");
        assert!(human_bytes(3 * 1024 * 1024).starts_with("3.0"));
    }
}
