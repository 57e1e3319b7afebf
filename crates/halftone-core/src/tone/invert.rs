//! Luminance inversion.

use crate::frame::GrayBuffer;

/// Replace every sample `v` with `255 - v`.
pub fn invert(buffer: &mut GrayBuffer) {
    for v in buffer.as_mut_slice() {
        *v = 255.0 - *v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert() {
        let mut buffer = GrayBuffer::from_vec(3, 1, vec![0.0, 100.5, 255.0]);
        invert(&mut buffer);
        assert_eq!(buffer.as_slice(), &[255.0, 154.5, 0.0]);
    }

    #[test]
    fn test_invert_twice_restores() {
        let original = GrayBuffer::from_vec(2, 1, vec![12.25, 200.0]);
        let mut buffer = original.clone();
        invert(&mut buffer);
        invert(&mut buffer);
        assert_eq!(buffer, original);
    }
}
