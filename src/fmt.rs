//! Logging shims
//!
//! Dispatch to `defmt` on target and to `log` on hosts. With neither
//! feature enabled the arguments are still evaluated by reference so
//! builds stay warning-free.

#![allow(unused_macros)]

macro_rules! trace {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::trace!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$e),*);
    }
}

pub(crate) use trace;

macro_rules! debug {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::debug!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$e),*);
    }
}

pub(crate) use debug;

macro_rules! warn_impl {
    ($($e:expr),*) => {
        #[cfg(feature = "log")]
        ::log::warn!($($e),*);
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($e),*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$e),*);
    }
}

pub(crate) use warn_impl as warn;
