use crate::{HandLandmarkerOptions, HandLandmarks, PalmDetection, Roi, iou};

/// Regions whose bounds overlap more than this are taken to hold the same hand.
pub const ROI_OVERLAP_IOU: f32 = 0.5;

/// Hand regions carried from one frame to the next.
///
/// In static image mode nothing is carried and every frame starts from palm detection.
#[derive(Debug, Clone)]
pub struct HandTracker {
    static_image_mode: bool,
    max_num_hands: usize,
    tracked: Vec<Roi>,
}

impl HandTracker {
    pub fn new(options: &HandLandmarkerOptions) -> Self {
        Self {
            static_image_mode: options.static_image_mode,
            max_num_hands: options.max_num_hands,
            tracked: Vec::new(),
        }
    }

    pub fn tracked(&self) -> &[Roi] {
        &self.tracked
    }

    /// Takes the regions found on the previous frame.
    pub fn take_regions(&mut self) -> Vec<Roi> {
        std::mem::take(&mut self.tracked)
    }

    /// Whether `rois` leave room for newly detected palms.
    pub fn needs_palms(&self, rois: &[Roi]) -> bool {
        rois.len() < self.max_num_hands
    }

    /// Adds the regions of palms not already covered by `rois`, keeping at most
    /// `max_num_hands`.
    pub fn merge_palms(&self, mut rois: Vec<Roi>, palms: &[PalmDetection]) -> Vec<Roi> {
        for palm in palms {
            let roi = Roi::from_palm(palm);
            if !overlaps_any(&rois, &roi) {
                rois.push(roi);
            }
        }
        rois.truncate(self.max_num_hands);
        rois
    }

    /// Keeps the hands whose next region does not overlap an earlier one and remembers those
    /// regions for the next frame.
    pub fn finish_frame(&mut self, estimates: Vec<(HandLandmarks, Roi)>) -> Vec<HandLandmarks> {
        let mut hands = Vec::with_capacity(estimates.len());
        let mut next: Vec<Roi> = Vec::with_capacity(estimates.len());
        for (hand, roi) in estimates {
            // two regions converged on the same hand
            if overlaps_any(&next, &roi) {
                continue;
            }
            next.push(roi);
            hands.push(hand);
        }
        if !self.static_image_mode {
            self.tracked = next;
        }
        hands
    }

    pub fn reset(&mut self) {
        self.tracked.clear();
    }
}

pub fn overlaps_any(rois: &[Roi], roi: &Roi) -> bool {
    let bounds = roi.bounds();
    rois.iter()
        .any(|other| iou(&other.bounds(), &bounds) > ROI_OVERLAP_IOU)
}
