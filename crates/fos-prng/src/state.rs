//! RC4-derived generator state.
//!
//! The permutation table and the two rotor indices. Nothing here is
//! synchronized: callers hold `&mut PrngState`, which for the shared
//! stream means holding its lock.

/// Size of the permutation table and of the seed key.
pub const KEY_LEN: usize = 256;

/// Generator state: rotor indices plus the 256-entry permutation table.
#[derive(Clone, PartialEq, Eq)]
pub struct PrngState {
    initialized: bool,
    i: u8,
    j: u8,
    s: [u8; KEY_LEN],
}

impl PrngState {
    /// Create an unseeded state.
    pub const fn new() -> Self {
        Self {
            initialized: false,
            i: 0,
            j: 0,
            s: [0; KEY_LEN],
        }
    }

    /// Whether the table has been seeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// First rotor index.
    pub fn i(&self) -> u8 {
        self.i
    }

    /// Second rotor index.
    pub fn j(&self) -> u8 {
        self.j
    }

    /// The permutation table, or `None` while unseeded.
    pub fn table(&self) -> Option<&[u8; KEY_LEN]> {
        self.initialized.then_some(&self.s)
    }

    /// Run the key schedule over `key` and mark the state initialized.
    ///
    /// The `j` accumulated by the schedule is left in place and becomes the
    /// starting `j` of generation.
    pub fn seed(&mut self, key: &[u8; KEY_LEN]) {
        self.i = 0;
        self.j = 0;
        for (n, slot) in self.s.iter_mut().enumerate() {
            *slot = n as u8;
        }
        for n in 0..KEY_LEN {
            self.j = self.j.wrapping_add(self.s[n]).wrapping_add(key[n]);
            self.s.swap(n, self.j as usize);
        }
        self.initialized = true;
    }

    /// Advance the rotors one step and return the next output byte.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        let t = self.s[self.i as usize];
        self.j = self.j.wrapping_add(t);
        self.s.swap(self.i as usize, self.j as usize);
        let t = t.wrapping_add(self.s[self.i as usize]);
        self.s[t as usize]
    }

    /// Fill `buf` with consecutive output bytes.
    pub fn fill(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = self.next_byte();
        }
    }

    /// Drop back to the unseeded state. The table is left as is but will
    /// be rebuilt by the next `seed`.
    pub fn invalidate(&mut self) {
        self.initialized = false;
    }

    /// Check that the table holds every byte value exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; KEY_LEN];
        for &v in self.s.iter() {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
        true
    }
}

impl Default for PrngState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PrngState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The table is 256 bytes of noise; keep debug output readable.
        f.debug_struct("PrngState")
            .field("initialized", &self.initialized)
            .field("i", &self.i)
            .field("j", &self.j)
            .finish_non_exhaustive()
    }
}
