#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeStrategy {
    Natural,
    FitWidth(u32),
}

impl ResizeStrategy {
    pub fn from_width(width: Option<u32>) -> Self {
        match width {
            Some(w) => ResizeStrategy::FitWidth(w),
            None => ResizeStrategy::Natural,
        }
    }

    pub fn apply(self, input: &Size) -> Option<Size> {
        if input.w == 0.0 || input.h == 0.0 {
            return None;
        }

        let output_size = match self {
            ResizeStrategy::Natural => *input,

            ResizeStrategy::FitWidth(w) => {
                let w = f64::from(w);
                Size::new(w, input.h * w / input.w)
            }
        };

        Some(output_size)
    }
}
