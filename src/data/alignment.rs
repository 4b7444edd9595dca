// alignment.rs - Multiple sequence alignment storage and column access

use crate::core::mask::Mask;

/// Read-only access to an alignment as a character matrix.
///
/// Feature extraction is written against this trait only, so any storage
/// layout (one buffer per sequence, one flat row-major buffer, ...) can be
/// filtered without copying it first.
pub trait ColumnSource: Sync {
    /// Number of sequences (rows)
    fn sequence_count(&self) -> usize;

    /// Number of columns shared by every sequence
    fn alignment_length(&self) -> usize;

    /// Character of `sequence` at `column`
    fn char_at(&self, sequence: usize, column: usize) -> u8;
}

/// An owned alignment: one byte buffer per sequence, plus sequence names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub names: Vec<String>,
    pub sequences: Vec<Vec<u8>>,
}

impl Alignment {
    /// Build an alignment, checking that it has at least two sequences, at
    /// least one column and a uniform length.
    pub fn new(names: Vec<String>, sequences: Vec<Vec<u8>>) -> Result<Self, String> {
        if names.len() != sequences.len() {
            return Err(format!(
                "Alignment has {} names but {} sequences",
                names.len(),
                sequences.len()
            ));
        }
        if sequences.len() < 2 {
            return Err(format!(
                "Alignment must contain at least 2 sequences, found {}",
                sequences.len()
            ));
        }

        let length = sequences[0].len();
        if length == 0 {
            return Err("Alignment length must be at least 1".to_string());
        }
        if let Some((i, seq)) = sequences.iter().enumerate().find(|(_, s)| s.len() != length) {
            return Err(format!(
                "Sequence '{}' has length {}, expected {}",
                names[i],
                seq.len(),
                length
            ));
        }

        Ok(Self { names, sequences })
    }

    /// Build an alignment from bare rows, naming them `seq1`, `seq2`, ...
    pub fn from_rows<S: AsRef<[u8]>>(rows: &[S]) -> Result<Self, String> {
        let names = (1..=rows.len()).map(|i| format!("seq{}", i)).collect();
        let sequences = rows.iter().map(|r| r.as_ref().to_vec()).collect();
        Self::new(names, sequences)
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Copy into the row-major layout used by [`FlatAlignment`]
    pub fn to_flat(&self) -> Vec<u8> {
        self.sequences.concat()
    }

    /// Keep only the columns whose mask entry is set.
    pub fn filter_columns(&self, mask: &Mask) -> Result<Alignment, String> {
        if mask.len() != self.alignment_length() {
            return Err(format!(
                "Mask covers {} columns but the alignment has {}",
                mask.len(),
                self.alignment_length()
            ));
        }
        if mask.kept() == 0 {
            return Err("Mask discards every column; nothing left to write".to_string());
        }

        let sequences = self
            .sequences
            .iter()
            .map(|seq| {
                seq.iter()
                    .zip(mask.iter())
                    .filter(|(_, keep)| *keep)
                    .map(|(c, _)| *c)
                    .collect()
            })
            .collect();

        Ok(Alignment {
            names: self.names.clone(),
            sequences,
        })
    }
}

impl ColumnSource for Alignment {
    fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    fn alignment_length(&self) -> usize {
        self.sequences.first().map_or(0, |s| s.len())
    }

    fn char_at(&self, sequence: usize, column: usize) -> u8 {
        self.sequences[sequence][column]
    }
}

/// A borrowed alignment stored as one row-major buffer of
/// `sequence_count * alignment_length` bytes.
#[derive(Debug, Clone, Copy)]
pub struct FlatAlignment<'a> {
    data: &'a [u8],
    sequence_count: usize,
    alignment_length: usize,
}

impl<'a> FlatAlignment<'a> {
    pub fn new(
        data: &'a [u8],
        sequence_count: usize,
        alignment_length: usize,
    ) -> Result<Self, String> {
        if sequence_count < 2 {
            return Err(format!(
                "Alignment must contain at least 2 sequences, found {}",
                sequence_count
            ));
        }
        if alignment_length == 0 {
            return Err("Alignment length must be at least 1".to_string());
        }
        let expected = sequence_count
            .checked_mul(alignment_length)
            .ok_or("Alignment dimensions overflow")?;
        if data.len() != expected {
            return Err(format!(
                "Buffer holds {} bytes, expected {} ({} x {})",
                data.len(),
                expected,
                sequence_count,
                alignment_length
            ));
        }

        Ok(Self {
            data,
            sequence_count,
            alignment_length,
        })
    }
}

impl ColumnSource for FlatAlignment<'_> {
    fn sequence_count(&self) -> usize {
        self.sequence_count
    }

    fn alignment_length(&self) -> usize {
        self.alignment_length
    }

    fn char_at(&self, sequence: usize, column: usize) -> u8 {
        self.data[sequence * self.alignment_length + column]
    }
}
