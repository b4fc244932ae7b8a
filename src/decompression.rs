use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Chain, Cursor, Read};

type ChainReader = Chain<Cursor<Vec<u8>>, File>;

/// Decompressing wrapper over an opened log file
/// Detects gzip (1F 8B 08) and zstd (28 B5 2F FD) compression using magic bytes
pub enum DecompressionReader {
    Gzip(MultiGzDecoder<ChainReader>),
    Zstd(zstd::Decoder<'static, BufReader<ChainReader>>),
    Plain(ChainReader),
}

impl std::fmt::Debug for DecompressionReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecompressionReader::Gzip(_) => write!(f, "DecompressionReader::Gzip"),
            DecompressionReader::Zstd(_) => write!(f, "DecompressionReader::Zstd"),
            DecompressionReader::Plain(_) => write!(f, "DecompressionReader::Plain"),
        }
    }
}

impl Read for DecompressionReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            DecompressionReader::Gzip(reader) => reader.read(buf),
            DecompressionReader::Zstd(reader) => reader.read(buf),
            DecompressionReader::Plain(reader) => reader.read(buf),
        }
    }
}

impl DecompressionReader {
    /// Wrap `file`, choosing a decoder from its first four bytes
    pub fn new(mut file: File) -> std::io::Result<Self> {
        let mut head = [0u8; 4];
        let n = read_up_to(&mut file, &mut head)?;

        // Put the read bytes back in front using a cursor chain
        let chained = Cursor::new(head[..n].to_vec()).chain(file);

        let is_gzip = n >= 3 && head[..3] == [0x1F, 0x8B, 0x08];
        let is_zstd = n >= 4 && head == [0x28, 0xB5, 0x2F, 0xFD];

        if is_gzip {
            Ok(DecompressionReader::Gzip(MultiGzDecoder::new(chained)))
        } else if is_zstd {
            Ok(DecompressionReader::Zstd(zstd::Decoder::new(chained)?))
        } else {
            Ok(DecompressionReader::Plain(chained))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DecompressionReader::Gzip(_) => "gzip",
            DecompressionReader::Zstd(_) => "zstd",
            DecompressionReader::Plain(_) => "plain",
        }
    }
}

/// `read` until `buf` is full or the file ends; short files are fine
fn read_up_to(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
