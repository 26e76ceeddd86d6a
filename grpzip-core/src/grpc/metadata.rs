/// Flatten ASCII metadata into string pairs; binary-valued keys are skipped.
pub(super) fn metadata_pairs(md: &tonic::metadata::MetadataMap) -> Vec<(String, String)> {
    md.iter()
        .filter_map(|entry| match entry {
            tonic::metadata::KeyAndValueRef::Ascii(key, value) => value
                .to_str()
                .ok()
                .map(|v| (key.as_str().to_string(), v.to_string())),
            tonic::metadata::KeyAndValueRef::Binary(_, _) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_ascii_pairs() {
        let mut md = tonic::metadata::MetadataMap::new();
        md.insert(
            "grpc-encoding",
            tonic::metadata::MetadataValue::from_static("gzip"),
        );

        let pairs = metadata_pairs(&md);
        assert_eq!(
            pairs,
            vec![("grpc-encoding".to_string(), "gzip".to_string())]
        );
    }
}
