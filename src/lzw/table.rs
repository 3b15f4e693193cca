//! LZW code dictionary.
//!
//! An open-addressing hash table mapping (prefix code, suffix value)
//! pairs to dictionary codes.  The table is sized to a fixed prime
//! larger than the maximum number of live entries (4096 minus the two
//! reserved codes) to bound clustering.

/// Number of slots in the dictionary, a prime number.
pub const TABLE_SIZE: usize = 3851;

/// A code not yet claimed by any dictionary entry.
const FREE: i16 = -1;

/// One dictionary entry: the code assigned to the string formed by
/// appending `suffix` to the string of `prefix`.
#[derive(Clone,Copy)]
struct CodeEntry {
    prefix: i16,
    code: i16,
    suffix: u8,
}

/// Result of probing the dictionary for a (prefix, suffix) pair.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum Probe {
    /// The pair is present, mapped to this code.
    Found(u16),

    /// The pair is absent; this slot may be claimed for it.
    Free(usize),

    /// The probe sequence was exhausted without finding the pair or
    /// a free slot.
    Full,
}

/// LZW code dictionary.
pub struct CodeTable {
    table: Vec<CodeEntry>,
}

impl CodeEntry {
    fn is_free(&self) -> bool {
        self.code == FREE
    }
}

impl CodeTable {
    /// Allocate a new dictionary with all slots free.
    pub fn new() -> Self {
        let free = CodeEntry {
            prefix: FREE,
            code: FREE,
            suffix: 0,
        };

        CodeTable {
            table: vec![free; TABLE_SIZE],
        }
    }

    /// Free every slot.
    pub fn reset(&mut self) {
        for e in self.table.iter_mut() {
            e.prefix = FREE;
            e.code = FREE;
            e.suffix = 0;
        }
    }

    /// Look for a (prefix, suffix) pair in the dictionary.
    ///
    /// Collisions are resolved by probing with a step that increases
    /// by 2 on every retry, wrapping around the table.  The probe
    /// stops at the first slot that matches the pair or is free.
    pub fn probe(&self, prefix: u16, suffix: u8) -> Probe {
        let mut i = (((suffix as usize) << 5) ^ (prefix as usize)) % TABLE_SIZE;
        let mut step = 0;

        loop {
            let e = &self.table[i];
            if e.is_free() {
                return Probe::Free(i);
            } else if e.prefix == prefix as i16 && e.suffix == suffix {
                return Probe::Found(e.code as u16);
            }

            step = step + 2;
            if step >= TABLE_SIZE {
                return Probe::Full;
            }
            i = (i + step) % TABLE_SIZE;
        }
    }

    /// Claim a free slot, previously returned by `probe`, for the
    /// given pair and code.
    pub fn claim(&mut self, slot: usize, prefix: u16, code: u16, suffix: u8) {
        let e = &mut self.table[slot];
        debug_assert!(e.is_free());

        e.prefix = prefix as i16;
        e.code = code as i16;
        e.suffix = suffix;
    }
}
