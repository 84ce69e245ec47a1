use approx::assert_relative_eq;

use crate::time::Time;

#[test]
fn test_time_conversions() {
    let year = Time::from_years(1.0);
    assert_relative_eq!(year.to_days(), 365.25);
    assert_relative_eq!(Time::from_days(1.0).to_hours(), 24.0);
    assert_relative_eq!(Time::from_hours(1.0).to_seconds(), 3600.0);
}

#[test]
fn test_time_arithmetic() {
    let a = Time::from_days(10.0);
    let b = Time::from_days(4.0);
    assert_relative_eq!((a - b).to_days(), 6.0);
    assert_relative_eq!((a + b).to_days(), 14.0);
    assert_relative_eq!(a / b, 2.5);
}
