//! Aspect-ratio correction for the full-screen quad

/// Compute the aspect-ratio scale factor for a window size
///
/// The scale maps the quad's square clip space onto the window so the
/// ray-marched image keeps square pixels: the larger dimension gets 1.0
/// and the other gets the ratio, so `max(scale[0], scale[1]) == 1` and
/// `scale[0] / scale[1] == width / height`.
///
/// Returns `None` for a zero-sized (minimized) window; callers keep their
/// previous scale in that case.
pub fn viewport_scale(width: u32, height: u32) -> Option<[f32; 2]> {
    if width == 0 || height == 0 {
        return None;
    }
    let w = width as f32;
    let h = height as f32;
    let max = w.max(h);
    Some([w / max, h / max])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_component_is_one() {
        for (w, h) in [(1024, 1024), (1920, 1080), (600, 800), (1, 4096)] {
            let scale = viewport_scale(w, h).unwrap();
            assert_eq!(scale[0].max(scale[1]), 1.0, "size {}x{}", w, h);
        }
    }

    #[test]
    fn test_ratio_matches_window() {
        let scale = viewport_scale(1920, 1080).unwrap();
        let expected = 1920.0 / 1080.0;
        assert!((scale[0] / scale[1] - expected).abs() < 1e-6);

        // Portrait window: component ratio is the inverse
        let scale = viewport_scale(1080, 1920).unwrap();
        assert!((scale[1] / scale[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_square_window_is_unit() {
        assert_eq!(viewport_scale(512, 512), Some([1.0, 1.0]));
    }

    #[test]
    fn test_zero_dimension_is_none() {
        assert_eq!(viewport_scale(0, 600), None);
        assert_eq!(viewport_scale(800, 0), None);
    }
}
