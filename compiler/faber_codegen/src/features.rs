//! Optional target facilities used by a program.
//!
//! Each backend owns one set, only ever adds flags while lowering, and reads
//! it once afterwards to synthesize the preamble.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TsFeatures: u16 {
        /// The `Responsum<T>` protocol type.
        const RESPONSUM = 1 << 0;
        const FIUNT = 1 << 1;
        const FIENT = 1 << 2;
        const PRAEFIXUM = 1 << 3;
        const RANGE = 1 << 4;
        const SHUFFLE = 1 << 5;
        const GROUP_BY = 1 << 6;
        const CHUNK = 1 << 7;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PyFeatures: u16 {
        const DECIMAL = 1 << 0;
        const ENUM = 1 << 1;
        const DATACLASS = 1 << 2;
        const PROTOCOL = 1 << 3;
        const ANY = 1 << 4;
        const MATH = 1 << 5;
        const RANDOM = 1 << 6;
        const SYS = 1 << 7;
        const PRAEFIXUM = 1 << 8;
        const FIUNT = 1 << 9;
        const FIENT = 1 << 10;
        /// `functools`: `reduce` and `cmp_to_key`.
        const REDUCE = 1 << 11;
        const GROUP_BY = 1 << 12;
        /// `dataclasses.field`, for mutable field defaults.
        const FIELD = 1 << 13;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ZigFeatures: u8 {
        const STD = 1 << 0;
        /// Page allocator.
        const ALLOCATOR = 1 << 1;
        /// The `faberLista` constructor for non-empty list literals.
        const LIST_LITERAL = 1 << 2;
    }
}
