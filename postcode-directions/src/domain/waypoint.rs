//! Waypoint chaining.

/// Split a journey through `waypoints` into consecutive point-to-point hops.
///
/// Stops are visited in the order given; no reordering is attempted.
///
/// # Examples
///
/// ```
/// use postcode_directions::domain::build_pairs;
///
/// let none: [&str; 0] = [];
/// assert_eq!(build_pairs("A", "B", &none), vec![("A", "B")]);
///
/// let wps = ["X".to_string(), "Y".to_string()];
/// assert_eq!(build_pairs("A", "B", &wps), vec![("A", "X"), ("X", "Y"), ("Y", "B")]);
/// ```
pub fn build_pairs<'a, S: AsRef<str>>(
    origin: &'a str,
    destination: &'a str,
    waypoints: &'a [S],
) -> Vec<(&'a str, &'a str)> {
    let stops: Vec<&str> = std::iter::once(origin)
        .chain(waypoints.iter().map(AsRef::as_ref))
        .chain(std::iter::once(destination))
        .collect();

    stops.windows(2).map(|w| (w[0], w[1])).collect()
}
