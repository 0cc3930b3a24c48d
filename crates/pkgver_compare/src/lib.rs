// pkgver version compare
//
// Total three-way ordering over free-form repository version strings.
//
// --- General rules ---
//
// 1. A version string is a run of alphanumeric tokens; anything that is not
//    an ASCII letter or digit separates tokens, and the separator characters
//    themselves never matter:      1.2.3 == 1-2-3 == 1_2_3
// 2. Digit runs compare numerically, not lexicographically:  1.2 < 1.10
// 3. A letter run is ranked by its lowercased first letter only:
//    1.0alpha == 1.0a, and ALPHA == alpha
// 4. Letters attached to a number outrank the bare number:  1.0 < 1.0a < 1.0b
// 5. A token of letters alone ranks below a bare zero:      1.0.a < 1.0
// 6. An exhausted string pads with zero components:         1 == 1.0 == 1.0.0
// 7. A number+letters+number token splits in two, keeping left-to-right
//    intent:                                     1 < 1a < 1a2 < 1a3 < 2
// 8. Digit runs saturate at VERCOMP_MAX; two runs that both saturate
//    compare equal (accepted precision loss at that magnitude).
//
// --- Patch markers ---
//
// A letter run of "p", "patch" or "pl" (any case) can be ranked as a patch
// marker instead of a plain letter suffix. PatchOrder selects, per input
// string, whether the marked version sorts below the unmarked one (Pending),
// above it (Applied), or gets no special treatment (Suffix, the default).
// Markers only change alpha ranking; digit runs always compare numerically.

use std::cmp::Ordering;

pub mod strip;

/// Digit runs are clamped here while accumulating, so arbitrarily long runs
/// cannot overflow. One more digit on top of a clamped value stays in range.
pub const VERCOMP_MAX: u64 = (u64::MAX - 9) / 10;

// --- Patch policy ---------------------------------------------------

/// How recognized patch markers rank against the unmarked version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatchOrder {
    /// Plain letter-suffix ordering, markers get no special treatment.
    #[default]
    Suffix,
    /// A not-yet-released patch, sorts below the unmarked version.
    Pending,
    /// An applied patch, sorts above the unmarked version.
    Applied,
}

/// Flag bit for [`vercmp_flags`]: patch markers sort below.
pub const PATCH_SORTS_BELOW: u32 = 1 << 0;
/// Flag bit for [`vercmp_flags`]: patch markers sort above. Wins over
/// [`PATCH_SORTS_BELOW`] when both are set.
pub const PATCH_SORTS_ABOVE: u32 = 1 << 1;

impl PatchOrder {
    /// Decode a flag bitmask. Unknown bits are ignored.
    pub fn from_flags(flags: u32) -> Self {
        if flags & PATCH_SORTS_ABOVE != 0 {
            PatchOrder::Applied
        } else if flags & PATCH_SORTS_BELOW != 0 {
            PatchOrder::Pending
        } else {
            PatchOrder::Suffix
        }
    }
}

fn is_patch_marker(run: &[u8]) -> bool {
    run.eq_ignore_ascii_case(b"p")
        || run.eq_ignore_ascii_case(b"patch")
        || run.eq_ignore_ascii_case(b"pl")
}

// --- Atoms and components -------------------------------------------

/// A numeric slot. Absent ranks below every present value, so a present
/// trailing number outranks a missing one: 1a < 1a2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Num {
    Absent,
    Value(u64),
}

/// An alpha slot. Variant order is rank order: a pending patch sorts below
/// "no letters at all", an applied patch above any plain letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Alpha {
    Pending,
    None,
    Letter(u8),
    Applied,
}

/// One parsed chunk of a version string. Field order is comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Component {
    number: Num,
    alpha: Alpha,
    trailing: Num,
}

impl Component {
    /// What an exhausted string keeps producing, so a finished string
    /// compares as zero-padding against a still-running one.
    const END: Component = Component {
        number: Num::Value(0),
        alpha: Alpha::None,
        trailing: Num::Absent,
    };
}

/// Up to two components pending comparison.
#[derive(Debug, Clone, Copy)]
struct Buffer {
    slots: [Component; 2],
    len: usize,
}

impl Buffer {
    const EMPTY: Buffer = Buffer {
        slots: [Component::END; 2],
        len: 0,
    };

    fn one(c: Component) -> Buffer {
        Buffer {
            slots: [c, Component::END],
            len: 1,
        }
    }

    fn two(a: Component, b: Component) -> Buffer {
        Buffer {
            slots: [a, b],
            len: 2,
        }
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn drop_front(&mut self, n: usize) {
        self.slots[0] = self.slots[1];
        self.len -= n;
    }
}

// --- Tokenizer ------------------------------------------------------

/// Single left-to-right pass over one version string, no backtracking.
struct Tokenizer<'a> {
    rest: &'a [u8],
    patch: PatchOrder,
}

impl<'a> Tokenizer<'a> {
    fn new(v: &'a str, patch: PatchOrder) -> Self {
        Self {
            rest: v.as_bytes(),
            patch,
        }
    }

    /// True once every input byte has been consumed.
    fn exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    fn take_number(&mut self) -> Num {
        let len = self
            .rest
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if len == 0 {
            return Num::Absent;
        }
        let mut n: u64 = 0;
        for &c in &self.rest[..len] {
            n = n * 10 + u64::from(c - b'0');
            if n > VERCOMP_MAX {
                n = VERCOMP_MAX;
            }
        }
        self.rest = &self.rest[len..];
        Num::Value(n)
    }

    fn take_alpha(&mut self) -> Alpha {
        let len = self
            .rest
            .iter()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        if len == 0 {
            return Alpha::None;
        }
        let run = &self.rest[..len];
        self.rest = &self.rest[len..];
        match self.patch {
            PatchOrder::Pending if is_patch_marker(run) => Alpha::Pending,
            PatchOrder::Applied if is_patch_marker(run) => Alpha::Applied,
            _ => Alpha::Letter(run[0].to_ascii_lowercase()),
        }
    }

    /// Parse the next 1 or 2 components. At end of input this keeps
    /// returning the end component without advancing; the comparator loop
    /// tracks exhaustion so emission stays finite.
    fn next_components(&mut self) -> Buffer {
        while let Some(&c) = self.rest.first()
            && !c.is_ascii_alphanumeric()
        {
            self.rest = &self.rest[1..];
        }
        if self.rest.is_empty() {
            return Buffer::one(Component::END);
        }

        let number = self.take_number();
        let alpha = self.take_alpha();
        let trailing = self.take_number();

        // leftover of the token, e.g. the "b3" of "1a2b3"
        while let Some(&c) = self.rest.first()
            && c.is_ascii_alphanumeric()
        {
            self.rest = &self.rest[1..];
        }

        if let (Num::Value(_), Num::Value(_)) = (number, trailing) {
            // number+letters+number with no separator splits in two, so that
            // 1 < 1a < 1a2 < 1a3 < 2 holds and the patch policy still
            // decides at the alpha slot
            Buffer::two(
                Component {
                    number,
                    alpha,
                    trailing: Num::Absent,
                },
                Component {
                    number: Num::Value(0),
                    alpha: Alpha::None,
                    trailing,
                },
            )
        } else {
            Buffer::one(Component {
                number,
                alpha,
                trailing,
            })
        }
    }
}

// --- Comparator -----------------------------------------------------

/// Three-way compare with the default policy on both sides.
pub fn vercmp(v1: &str, v2: &str) -> Ordering {
    vercmp_with(v1, PatchOrder::Suffix, v2, PatchOrder::Suffix)
}

/// Three-way compare with a patch policy per input string.
///
/// Component-synchronized merge: both sides refill a small buffer from their
/// tokenizer, compare the shared prefix, and the longer buffer keeps its
/// tail for the next round. That is what lets a split two-component token
/// line up against a plain token on the other side.
pub fn vercmp_with(v1: &str, p1: PatchOrder, v2: &str, p2: PatchOrder) -> Ordering {
    let mut t1 = Tokenizer::new(v1, p1);
    let mut t2 = Tokenizer::new(v2, p2);
    let mut buf1 = Buffer::EMPTY;
    let mut buf2 = Buffer::EMPTY;

    while !t1.exhausted() || !t2.exhausted() || !buf1.is_empty() || !buf2.is_empty() {
        if buf1.is_empty() {
            buf1 = t1.next_components();
        }
        if buf2.is_empty() {
            buf2 = t2.next_components();
        }

        let shift = buf1.len.min(buf2.len);
        for i in 0..shift {
            match buf1.slots[i].cmp(&buf2.slots[i]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        buf1.drop_front(shift);
        buf2.drop_front(shift);
    }

    Ordering::Equal
}

/// Conventional comparator contract for binding layers: `-1`/`0`/`1`, with
/// a flag bitmask applied to both sides.
pub fn vercmp_flags(v1: &str, v2: &str, flags: u32) -> i32 {
    let policy = PatchOrder::from_flags(flags);
    match vercmp_with(v1, policy, v2, policy) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

// --- VersionRef -----------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct VersionRef<'a> {
    pub v: &'a str,
}

impl<'a> VersionRef<'a> {
    pub fn new(v: &'a str) -> Self {
        Self { v }
    }
    pub fn as_str(&self) -> &str {
        self.v
    }
}

impl PartialEq for VersionRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        matches!(vercmp(self.v, other.v), Ordering::Equal)
    }
}
impl Eq for VersionRef<'_> {}
impl PartialOrd for VersionRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for VersionRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        vercmp(self.v, other.v)
    }
}

impl std::fmt::Display for VersionRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.v)
    }
}

// --- VersionOwned ---------------------------------------------------

#[derive(Debug, Clone)]
pub struct VersionOwned(pub String);

impl VersionOwned {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for VersionOwned {
    fn eq(&self, other: &Self) -> bool {
        VersionRef::new(&self.0).eq(&VersionRef::new(&other.0))
    }
}
impl Eq for VersionOwned {}
impl PartialOrd for VersionOwned {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for VersionOwned {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionRef::new(&self.0).cmp(&VersionRef::new(&other.0))
    }
}

impl std::fmt::Display for VersionOwned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
