use super::png::PngPredicate;
use super::svg::SvgPredicate;

/// Predicates to check that some output ([u8]) is of a certain file type

pub fn is_png() -> PngPredicate {
    PngPredicate {}
}

pub fn is_svg() -> SvgPredicate {
    SvgPredicate {}
}
