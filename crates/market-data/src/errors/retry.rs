/// Classification for retry accounting.
///
/// Used by the data loader to decide how an attempt failure is surfaced.
/// Every class is retried until the attempt budget runs out; the class
/// drives the log level, mirroring how the provider bundles connection
/// trouble with rate limiting but keeps unexpected failures distinct.
///
/// | Class | Retried? | Log level |
/// |-------|----------|-----------|
/// | `Transient` | Yes | `warn` |
/// | `Unexpected` | Yes | `error` |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Connection failure, timeout, or rate limiting (HTTP 429).
    ///
    /// Expected to clear on its own; the backoff sleep before the next
    /// attempt exists mostly to absorb this class.
    Transient,

    /// Anything else the provider throws at us, including an empty
    /// history. Retried all the same, but logged loudly because it is
    /// usually not load-related.
    Unexpected,
}
