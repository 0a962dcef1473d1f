//! `rand` interop.

use crate::stream::ByteStream;
use rand::RngCore;

/// Borrowing adapter that lets a [`ByteStream`] drive `rand` APIs.
///
/// Not a `CryptoRng`.
#[derive(Debug, Clone, Copy)]
pub struct StreamRng<'a> {
    stream: &'a ByteStream,
}

impl<'a> StreamRng<'a> {
    pub fn new(stream: &'a ByteStream) -> Self {
        Self { stream }
    }

    /// Adapter over the process-wide stream.
    pub fn global() -> StreamRng<'static> {
        StreamRng {
            stream: ByteStream::global(),
        }
    }
}

impl RngCore for StreamRng<'_> {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    /// # Panics
    ///
    /// Panics if the stream cannot be seeded, like `OsRng` does when the
    /// OS source fails.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("random stream unavailable: {e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.stream.fill_random_bytes(dest).map_err(rand::Error::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::FixedKey;
    use rand::Rng;
    use rand::seq::SliceRandom;

    #[test]
    fn test_next_u32_uses_stream_bytes() {
        let stream = ByteStream::new(FixedKey::identity());
        let mut rng = StreamRng::new(&stream);
        assert_eq!(rng.next_u32(), u32::from_le_bytes([0x19, 0x6b, 0x28, 0x67]));
    }

    #[test]
    fn test_drives_rand_apis() {
        let stream = ByteStream::new(FixedKey::new(b"shuffle").unwrap());
        let mut rng = StreamRng::new(&stream);

        for _ in 0..100 {
            let v: u32 = rng.gen_range(10..20);
            assert!((10..20).contains(&v));
        }

        let mut items: Vec<u32> = (0..32).collect();
        items.shuffle(&mut rng);
        items.sort_unstable();
        assert_eq!(items, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_global_adapter() {
        let mut rng = StreamRng::global();
        let mut buf = [0u8; 8];
        rng.try_fill_bytes(&mut buf).unwrap();
        assert!(ByteStream::global().is_seeded());
    }
}
