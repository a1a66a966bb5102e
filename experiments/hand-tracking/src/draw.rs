use {
    base::Vec2,
    image::{Image, draw_circle, draw_line},
    inference::{HAND_CONNECTIONS, HandLandmarks},
};

/// Color of the ring drawn around every landmark marker.
pub const BORDER_COLOR: [u8; 3] = [224, 224, 224];

/// Style of a landmark marker or a connection line. Colors are RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingSpec {
    pub color: [u8; 3],
    pub thickness: i32,
    pub circle_radius: i32,
}

impl DrawingSpec {
    pub const fn new(color: [u8; 3], thickness: i32, circle_radius: i32) -> Self {
        Self {
            color,
            thickness,
            circle_radius,
        }
    }

    /// Radius of the border ring around a marker of this style.
    pub fn border_radius(&self) -> i32 {
        (self.circle_radius + 1).max((self.circle_radius as f32 * 1.2) as i32)
    }
}

/// Red landmark markers.
pub const LANDMARK_STYLE: DrawingSpec = DrawingSpec::new([255, 0, 0], 2, 4);

/// Green skeleton lines.
pub const CONNECTION_STYLE: DrawingSpec = DrawingSpec::new([0, 255, 0], 2, 2);

/// Draws one hand onto `image`: connections first, then a bordered marker per landmark.
///
/// Landmarks outside the frame are skipped, together with every connection touching them.
pub fn draw_landmarks(
    image: &mut Image,
    hand: &HandLandmarks,
    landmark_style: &DrawingSpec,
    connection_style: &DrawingSpec,
) {
    let size = image.size;
    let pixels: Vec<Option<Vec2<i32>>> = (0..hand.landmarks.len())
        .map(|i| hand.pixel(i, size))
        .collect();

    for &(start, end) in HAND_CONNECTIONS.iter() {
        let (Some(Some(p0)), Some(Some(p1))) = (pixels.get(start), pixels.get(end)) else {
            continue;
        };
        draw_line(
            image,
            *p0,
            *p1,
            connection_style.color,
            connection_style.thickness,
        );
    }

    for p in pixels.iter().flatten() {
        draw_circle(
            image,
            *p,
            landmark_style.border_radius(),
            BORDER_COLOR,
            landmark_style.thickness,
        );
        draw_circle(
            image,
            *p,
            landmark_style.circle_radius,
            landmark_style.color,
            landmark_style.thickness,
        );
    }
}
