use alloc::boxed::Box;

/// Supplier of one magnitude frame per loop iteration.
///
/// Every frame has the same length and samples lie in `[0, 1)`. The returned
/// slice only has to live until the next call.
pub trait AudioSource {
    fn next_frame(&mut self) -> &[f32];
}

impl<A: AudioSource + ?Sized> AudioSource for &mut A {
    fn next_frame(&mut self) -> &[f32] {
        (**self).next_frame()
    }
}

impl<A: AudioSource + ?Sized> AudioSource for Box<A> {
    fn next_frame(&mut self) -> &[f32] {
        (**self).next_frame()
    }
}
