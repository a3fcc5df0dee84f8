use std::io::{self, Read, Seek, SeekFrom};


macro_rules! impl_read_be {
    ($name:ident, $ret_type:ty) => {
        fn $name(&mut self) -> Result<$ret_type, io::Error> {
            let mut buf = [0u8; ::std::mem::size_of::<$ret_type>()];
            self.read_exact(&mut buf)?;
            Ok(<$ret_type>::from_be_bytes(buf))
        }
    };
}
macro_rules! impl_read_be_at {
    ($name:ident, $read_name:ident, $ret_type:ty) => {
        fn $name(&mut self, position: u64) -> Result<$ret_type, io::Error> {
            self.seek(SeekFrom::Start(position))?;
            self.$read_name()
        }
    };
}


/// Fixed-width big-endian reads from the current position of a reader.
pub(crate) trait ReadExt : Read {
    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        let mut total_bytes_read = 0;
        while total_bytes_read < buf.len() {
            let bytes_read_this_time = self.read(&mut buf[total_bytes_read..])?;
            if bytes_read_this_time == 0 {
                // EOF, break out
                break;
            }
            total_bytes_read += bytes_read_this_time;
        }
        Ok(total_bytes_read)
    }

    fn read_byte_array<const N: usize>(&mut self) -> Result<[u8; N], io::Error> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_u8(&mut self) -> Result<u8, io::Error> {
        let [b] = self.read_byte_array::<1>()?;
        Ok(b)
    }

    impl_read_be!(read_u16_be, u16);
    impl_read_be!(read_u32_be, u32);
}
impl<R: Read + ?Sized> ReadExt for R {}


/// Fixed-width big-endian reads at an absolute position of a seekable reader.
///
/// Every read seeks first, so the position left behind by earlier reads never matters.
pub(crate) trait SeekReadExt : ReadExt + Seek {
    impl_read_be_at!(read_u8_at, read_u8, u8);
    impl_read_be_at!(read_u16_be_at, read_u16_be, u16);
    impl_read_be_at!(read_u32_be_at, read_u32_be, u32);

    /// Returns the total length of the stream, restoring the current position afterwards.
    fn stream_length(&mut self) -> Result<u64, io::Error> {
        let position = self.stream_position()?;
        let length = self.seek(SeekFrom::End(0))?;
        if position != length {
            self.seek(SeekFrom::Start(position))?;
        }
        Ok(length)
    }
}
impl<R: Read + Seek + ?Sized> SeekReadExt for R {}


#[cfg(test)]
mod tests {
    use super::{ReadExt, SeekReadExt};
    use std::io::{Cursor, Seek};

    #[test]
    fn test_big_endian_reads() {
        let mut cursor = Cursor::new(vec![0x12, 0x34, 0xFF, 0xFE, 0x80, 0x00, 0x00, 0x01, 0xAB]);
        assert_eq!(cursor.read_u16_be().unwrap(), 0x1234);
        assert_eq!(cursor.read_u16_be().unwrap(), 0xFFFE);
        assert_eq!(cursor.read_u32_be().unwrap(), 0x8000_0001);
        assert_eq!(cursor.read_u8().unwrap(), 0xAB);
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn test_positioned_reads() {
        let mut cursor = Cursor::new(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(cursor.read_u16_be_at(4).unwrap(), 0x0405);
        assert_eq!(cursor.read_u8_at(1).unwrap(), 0x01);
        assert_eq!(cursor.read_u32_be_at(0).unwrap(), 0x0001_0203);
    }

    #[test]
    fn test_stream_length_keeps_position() {
        let mut cursor = Cursor::new(vec![0u8; 10]);
        cursor.read_u16_be().unwrap();
        assert_eq!(cursor.stream_length().unwrap(), 10);
        assert_eq!(cursor.stream_position().unwrap(), 2);
    }

    #[test]
    fn test_read_exact_or_eof() {
        let mut cursor = Cursor::new(vec![1, 2, 3]);
        let mut buf = [0u8; 5];
        assert_eq!(cursor.read_exact_or_eof(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }
}
