/// Run `f` under runtime CPU feature detection when the `simd` feature is on.
#[inline(always)]
pub(crate) fn dispatch<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(feature = "simd")]
    {
        pulp::Arch::new().dispatch(f)
    }
    #[cfg(not(feature = "simd"))]
    {
        f()
    }
}

/// Like [`dispatch`], but skips detection for short loops where it would
/// dominate the cost.
#[inline(always)]
pub(crate) fn dispatch_if_large<R>(len: usize, f: impl FnOnce() -> R) -> R {
    if len >= 64 {
        dispatch(f)
    } else {
        f()
    }
}
