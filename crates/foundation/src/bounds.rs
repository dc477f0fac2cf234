/// Geographic bounding box in degrees.
///
/// Wire order is `[min_lng, min_lat, max_lng, max_lat]`. Construction
/// validates ranges, so a `LngLatBounds` value is always usable by the
/// camera; malformed input becomes `None`, never a panic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LngLatBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl LngLatBounds {
    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Option<Self> {
        let b = LngLatBounds {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        };
        b.is_valid().then_some(b)
    }

    pub fn from_array(raw: [f64; 4]) -> Option<Self> {
        Self::new(raw[0], raw[1], raw[2], raw[3])
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.min_lng, self.min_lat, self.max_lng, self.max_lat]
    }

    pub fn center(self) -> (f64, f64) {
        (
            (self.min_lng + self.max_lng) * 0.5,
            (self.min_lat + self.max_lat) * 0.5,
        )
    }

    fn is_valid(self) -> bool {
        let finite = self.to_array().iter().all(|v| v.is_finite());
        finite
            && self.min_lng <= self.max_lng
            && self.min_lat <= self.max_lat
            && (-180.0..=180.0).contains(&self.min_lng)
            && (-180.0..=180.0).contains(&self.max_lng)
            && (-90.0..=90.0).contains(&self.min_lat)
            && (-90.0..=90.0).contains(&self.max_lat)
    }
}
