// Optional logging. With the `log` feature off every call compiles away.

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Build a [`Batch`](crate::record::Batch) from mixed literals.
///
/// ```
/// use nexus_core::batch;
///
/// let batch = batch![100, -150, "e", 22.5];
/// assert_eq!(batch.len(), 4);
/// ```
#[macro_export]
macro_rules! batch {
    ($($item:expr),* $(,)?) => {
        $crate::record::Batch::from(vec![$($crate::record::Item::from($item)),*])
    };
}
