// phylip.rs - Relaxed PHYLIP alignment loader

use std::path::Path;
use crate::data::Alignment;

/// Longest sequence name accepted
pub const MAX_SEQUENCE_NAME_LENGTH: usize = 254;

/// Byte cursor over the file contents
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Next whitespace-delimited token, if any
    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let bytes: &'a [u8] = self.bytes;
        if self.pos > start {
            Some(&bytes[start..self.pos])
        } else {
            None
        }
    }

    /// Collect `count` non-whitespace characters, allowing line breaks and
    /// blanks between them.
    fn residues(&mut self, count: usize) -> Option<Vec<u8>> {
        let mut sequence = Vec::with_capacity(count.min(1 << 20));
        while sequence.len() < count {
            self.skip_whitespace();
            let &c = self.bytes.get(self.pos)?;
            sequence.push(c);
            self.pos += 1;
        }
        Some(sequence)
    }
}

fn parse_header_value(token: Option<&[u8]>, what: &str) -> Result<usize, String> {
    let token = token.ok_or_else(|| format!("Missing {} in PHYLIP header", what))?;
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| {
            format!(
                "Invalid {} in PHYLIP header: '{}'",
                what,
                String::from_utf8_lossy(token)
            )
        })
}

/// Parse a relaxed PHYLIP alignment: a `count length` header followed by one
/// `name sequence` record per sequence.
///
/// Works on raw bytes; names that are not valid UTF-8 are converted lossily
/// and residues are kept as read.
pub fn parse_phylip<B: AsRef<[u8]> + ?Sized>(content: &B) -> Result<Alignment, String> {
    let mut cursor = Cursor {
        bytes: content.as_ref(),
        pos: 0,
    };

    let sequence_count = parse_header_value(cursor.token(), "sequence count")?;
    let alignment_length = parse_header_value(cursor.token(), "alignment length")?;

    if sequence_count < 2 || alignment_length < 1 {
        return Err(format!(
            "PHYLIP header declares {} sequences of length {}; need at least 2 sequences and 1 column",
            sequence_count, alignment_length
        ));
    }

    let mut names = Vec::with_capacity(sequence_count.min(1 << 16));
    let mut sequences = Vec::with_capacity(sequence_count.min(1 << 16));

    for i in 0..sequence_count {
        let name = cursor
            .token()
            .ok_or_else(|| format!("Missing sequence {} of {}", i + 1, sequence_count))?;
        if name.len() > MAX_SEQUENCE_NAME_LENGTH {
            return Err(format!(
                "Name of sequence {} is {} characters long (max {})",
                i + 1,
                name.len(),
                MAX_SEQUENCE_NAME_LENGTH
            ));
        }
        let name = String::from_utf8_lossy(name).into_owned();

        let sequence = cursor.residues(alignment_length).ok_or_else(|| {
            format!(
                "Sequence '{}' is truncated (expected {} characters)",
                name, alignment_length
            )
        })?;

        names.push(name);
        sequences.push(sequence);
    }

    if let Some(extra) = cursor.token() {
        log::warn!(
            "PHYLIP header declares {} sequences; ignoring trailing data starting at '{}'",
            sequence_count,
            String::from_utf8_lossy(extra)
        );
    }

    Alignment::new(names, sequences)
}

/// Load a relaxed PHYLIP alignment file
pub fn from_phylip_file(path: &Path) -> Result<Alignment, String> {
    let content = std::fs::read(path)
        .map_err(|e| format!("Failed to read alignment file '{}': {}", path.display(), e))?;
    parse_phylip(&content).map_err(|e| format!("{} ({})", e, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{extract_features, Feature};

    #[test]
    fn test_parse_relaxed_phylip() {
        let content = "3 8\nhuman_long_name  ACGT-ACG\nmouse ACGTTACG\nfrog    AC?T-aCG\n";
        let alignment = parse_phylip(content).unwrap();

        assert_eq!(alignment.names, vec!["human_long_name", "mouse", "frog"]);
        assert_eq!(alignment.sequences[0], b"ACGT-ACG".to_vec());
        assert_eq!(alignment.sequences[2], b"AC?T-aCG".to_vec());
    }

    #[test]
    fn test_parse_wrapped_sequences() {
        let content = " 2 10\nseqA ACGTA\n  CGTAC\nseqB ACGTA CGTAC\n";
        let alignment = parse_phylip(content).unwrap();
        assert_eq!(alignment.sequences[0], b"ACGTACGTAC".to_vec());
        assert_eq!(alignment.sequences[1], b"ACGTACGTAC".to_vec());
    }

    #[test]
    fn test_bad_headers() {
        assert!(parse_phylip("").is_err());
        assert!(parse_phylip("two 5\n").is_err());
        assert!(parse_phylip("1 5\nonly ACGTA\n").is_err());
        assert!(parse_phylip("2 0\na\nb\n").is_err());
    }

    #[test]
    fn test_truncated_alignment() {
        let err = parse_phylip("2 6\nseqA ACGTAC\nseqB ACG\n").unwrap_err();
        assert!(err.contains("seqB"));

        assert!(parse_phylip("3 4\nseqA ACGT\nseqB ACGT\n").is_err());
    }

    #[test]
    fn test_non_utf8_bytes() {
        let alignment = parse_phylip(b"2 4\nalpha AC\xb7T\nbeta ACAT\n").unwrap();
        assert_eq!(alignment.sequences[0], vec![b'A', b'C', 0xB7, b'T']);

        // 0xB7 is neither a gap nor a letter but still counts as a sequence
        let features = extract_features(&alignment).unwrap();
        assert_eq!(features.get(2, Feature::Gaps), 0.0);
        assert_eq!(features.get(2, Feature::Identity), 0.5);
        assert_eq!(features.get(2, Feature::Entropy), 0.0);

        let alignment = parse_phylip(b"2 4\ncaf\xe9 ACGT\nbeta AC-T\n").unwrap();
        assert_eq!(alignment.names[0], "caf\u{FFFD}");
        assert_eq!(alignment.names[1], "beta");
    }

    #[test]
    fn test_non_utf8_file() {
        let path = std::env::temp_dir().join(format!("alifilter-phylip-{}-latin1.phy", std::process::id()));
        std::fs::write(&path, b"2 4\ncaf\xe9 AC\xb7T\nbeta AC-T\n").unwrap();

        let alignment = from_phylip_file(&path).unwrap();
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.sequences[0][2], 0xB7);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_extra_records_are_ignored() {
        let alignment = parse_phylip("2 3\nseqA ACG\nseqB ACG\nseqC ACG\n").unwrap();
        assert_eq!(alignment.names, vec!["seqA", "seqB"]);
        assert_eq!(alignment.sequences.len(), 2);
    }

    #[test]
    fn test_name_length_limit() {
        let long_name = "n".repeat(MAX_SEQUENCE_NAME_LENGTH + 1);
        let content = format!("2 2\n{} AC\nshort AC\n", long_name);
        assert!(parse_phylip(&content).is_err());

        let ok_name = "n".repeat(MAX_SEQUENCE_NAME_LENGTH);
        let content = format!("2 2\n{} AC\nshort AC\n", ok_name);
        assert!(parse_phylip(&content).is_ok());
    }
}
