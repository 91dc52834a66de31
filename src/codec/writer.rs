/// Little-endian byte builder for test fixtures
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.data.push(v);
        self
    }

    pub fn write_i32_le(&mut self, v: i32) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_u32_le(&mut self, v: u32) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_cstring(&mut self, s: &str) -> &mut Self {
        self.write_bytes(s.as_bytes());
        self.write_u8(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BinaryReader;

    #[test]
    fn test_writer_matches_reader() {
        let mut w = BinaryWriter::new();
        w.write_i32_le(-2).write_u32_le(0xDEADBEEF).write_cstring("act1");
        assert_eq!(w.len(), 13);

        let data = w.into_vec();
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_i32_le().unwrap(), -2);
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_cstring().unwrap(), "act1");
    }
}
