use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use thiserror::Error;

/// The external collaborator that turns an `.obj` file into a
/// `(start_addr, words)` pair the core can `Machine::load`. The wire format
/// is a big-endian `u16` stream: the first word is the load address, the
/// rest is the program. A trailing odd byte, if the file has one, is
/// dropped rather than treated as an error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read object file {path}: {source}")]
    Io { path: String, #[source] source: io::Error },
    #[error("object file {path} is empty (missing start address)")]
    Empty { path: String },
}

pub fn load_file(path: &str) -> Result<(u16, Vec<u16>), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io { path: path.to_string(), source })?;
    read_words(BufReader::new(file)).map_err(|source| {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            LoadError::Empty { path: path.to_string() }
        } else {
            LoadError::Io { path: path.to_string(), source }
        }
    })
}

fn read_words<R: Read>(mut reader: R) -> io::Result<(u16, Vec<u16>)> {
    let start_addr = reader.read_u16::<BigEndian>()?;

    let mut words = Vec::new();
    loop {
        match reader.read_u16::<BigEndian>() {
            Ok(word) => words.push(word),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }

    Ok((start_addr, words))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_bytes(start_addr: u16, words: &[u16]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&start_addr.to_be_bytes());
        for word in words {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn reads_start_address_and_program_words() {
        let bytes = object_bytes(0x3000, &[0x1021, 0xF025]);
        let (start_addr, words) = read_words(Cursor::new(bytes)).unwrap();

        assert_eq!(start_addr, 0x3000);
        assert_eq!(words, vec![0x1021, 0xF025]);
    }

    #[test]
    fn drops_a_trailing_odd_byte() {
        let mut bytes = object_bytes(0x3000, &[0x1021]);
        bytes.push(0xAB); // one stray trailing byte

        let (start_addr, words) = read_words(Cursor::new(bytes)).unwrap();

        assert_eq!(start_addr, 0x3000);
        assert_eq!(words, vec![0x1021]);
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = read_words(Cursor::new(Vec::new())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn program_with_no_words_past_the_start_address_loads_cleanly() {
        let bytes = object_bytes(0x3000, &[]);
        let (start_addr, words) = read_words(Cursor::new(bytes)).unwrap();

        assert_eq!(start_addr, 0x3000);
        assert!(words.is_empty());
    }
}
