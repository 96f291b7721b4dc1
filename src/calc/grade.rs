use crate::models::result::{Aggregate, Grade, ResultRecord};

/// Banding table, checked top-down; the first band whose floor is met wins
const BANDS: [(i64, Grade); 5] = [
    (90, Grade::APlus),
    (80, Grade::A),
    (70, Grade::B),
    (60, Grade::C),
    (50, Grade::D),
];

pub fn grade_for(percentage: i64) -> Grade {
    BANDS
        .iter()
        .find(|(floor, _)| percentage >= *floor)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

/// `round(part / whole * 100)` with halves rounded toward positive
/// infinity, 0 when `whole` is 0
pub fn rounded_percentage(part: i64, whole: i64) -> i64 {
    if whole == 0 {
        return 0;
    }
    // floor((200 * part + whole) / (2 * whole)) needs a positive divisor
    let (num, den) = (part * 200 + whole, whole * 2);
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    num.div_euclid(den)
}

/// Sum marks over `results` and grade the overall percentage
pub fn aggregate(results: &[ResultRecord]) -> Aggregate {
    let total: i64 = results.iter().map(|r| r.marks).sum();
    let max_total: i64 = results.iter().map(|r| r.max_marks).sum();
    let percentage = rounded_percentage(total, max_total);

    Aggregate {
        total,
        max_total,
        percentage,
        grade: grade_for(percentage),
    }
}
