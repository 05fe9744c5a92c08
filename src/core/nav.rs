use super::option::ListOption;

/// Settings for a single navigation step.
#[derive(Clone, Copy)]
pub struct NavOptions<'a> {
    /// Stepping past either end yields `None` instead of wrapping.
    pub allow_empty: bool,
    pub skip: &'a dyn Fn(&ListOption) -> bool,
}

impl<'a> NavOptions<'a> {
    pub fn new(skip: &'a dyn Fn(&ListOption) -> bool) -> Self {
        Self {
            allow_empty: false,
            skip,
        }
    }

    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
}

pub fn next_in_list<'a>(
    options: &'a [ListOption],
    current: Option<usize>,
    nav: NavOptions<'_>,
) -> Option<&'a ListOption> {
    step_in_list(options, current, nav, Step::Next)
}

pub fn previous_in_list<'a>(
    options: &'a [ListOption],
    current: Option<usize>,
    nav: NavOptions<'_>,
) -> Option<&'a ListOption> {
    step_in_list(options, current, nav, Step::Previous)
}

pub fn first_in_list<'a>(
    options: &'a [ListOption],
    skip: &dyn Fn(&ListOption) -> bool,
) -> Option<&'a ListOption> {
    next_in_list(options, None, NavOptions::new(skip))
}

pub fn last_in_list<'a>(
    options: &'a [ListOption],
    skip: &dyn Fn(&ListOption) -> bool,
) -> Option<&'a ListOption> {
    previous_in_list(options, None, NavOptions::new(skip))
}

fn step_in_list<'a>(
    options: &'a [ListOption],
    current: Option<usize>,
    nav: NavOptions<'_>,
    step: Step,
) -> Option<&'a ListOption> {
    let len = options.len();
    if len == 0 {
        return None;
    }
    let start = current.filter(|index| *index < len);
    let mut index = start;

    // Every option is visited at most once; returning to the start ends the walk
    // with that option even if it is skippable.
    for visited in 0..=len {
        let candidate = match (step, index) {
            (Step::Next, None) => Some(0),
            (Step::Next, Some(i)) if i + 1 >= len => (!nav.allow_empty).then_some(0),
            (Step::Next, Some(i)) => Some(i + 1),
            (Step::Previous, None) => Some(len - 1),
            (Step::Previous, Some(0)) => (!nav.allow_empty).then_some(len - 1),
            (Step::Previous, Some(i)) => Some(i - 1),
        }?;

        if Some(candidate) == start || (start.is_none() && visited == len) {
            return options.get(candidate);
        }
        let option = options.get(candidate)?;
        if !(nav.skip)(option) {
            return Some(option);
        }
        index = Some(candidate);
    }
    None
}

/// Rendered position of an option relative to its list box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Read access to rendered list geometry. Either method returns `None` when
/// the list is detached or not laid out.
pub trait ListGeometry {
    fn listbox_height(&self) -> Option<f64>;
    fn option_bounds(&self, key: &str) -> Option<Bounds>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Up,
    Down,
}

/// Jumps roughly one visible page from `focused`.
///
/// Returns the furthest selectable option whose rendered box still fits within
/// one list box height of the focused option. Falls back to the last (down) or
/// first (up) selectable option when geometry cannot be read.
pub fn move_page<'a>(
    direction: PageDirection,
    options: &'a [ListOption],
    focused: Option<&ListOption>,
    geometry: &dyn ListGeometry,
    skip: &dyn Fn(&ListOption) -> bool,
) -> Option<&'a ListOption> {
    let fallback = || match direction {
        PageDirection::Down => last_in_list(options, skip),
        PageDirection::Up => first_in_list(options, skip),
    };

    let Some(reference) = focused.and_then(|focused| locate(options, focused)) else {
        return first_in_list(options, skip);
    };
    let (Some(page_height), Some(origin)) = (
        geometry.listbox_height(),
        geometry.option_bounds(&reference.key),
    ) else {
        return fallback();
    };

    let indices: Box<dyn Iterator<Item = usize>> = match direction {
        PageDirection::Down => Box::new(reference.index + 1..options.len()),
        PageDirection::Up => Box::new((0..reference.index).rev()),
    };

    let mut nearest: Option<&ListOption> = None;
    let mut furthest: Option<&ListOption> = None;
    for index in indices {
        let Some(candidate) = options.get(index) else {
            break;
        };
        if skip(candidate) {
            continue;
        }
        let Some(bounds) = geometry.option_bounds(&candidate.key) else {
            return fallback();
        };
        let distance = match direction {
            PageDirection::Down => bounds.bottom() - origin.top,
            PageDirection::Up => origin.bottom() - bounds.top,
        };
        nearest.get_or_insert(candidate);
        if distance > page_height {
            break;
        }
        furthest = Some(candidate);
    }

    furthest.or(nearest).or(Some(reference))
}

fn locate<'a>(options: &'a [ListOption], focused: &ListOption) -> Option<&'a ListOption> {
    options
        .get(focused.index)
        .filter(|option| option.same_identity(focused))
        .or_else(|| options.iter().find(|option| option.same_identity(focused)))
}

#[cfg(test)]
mod tests {
    use super::{
        Bounds, ListGeometry, NavOptions, PageDirection, move_page, next_in_list,
        previous_in_list,
    };
    use crate::core::option::{ListOption, Options, skip_unselectable};
    use serde_json::json;

    fn labels(options: &Options) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    fn never(_: &ListOption) -> bool {
        false
    }

    #[test]
    fn next_wraps_and_previous_wraps() {
        let options = Options::from_strings(["a", "b", "c"]);
        let items = options.as_slice();
        let nav = NavOptions::new(&never);
        assert_eq!(next_in_list(items, Some(2), nav).map(|o| o.index), Some(0));
        assert_eq!(previous_in_list(items, Some(0), nav).map(|o| o.index), Some(2));
        assert_eq!(next_in_list(items, None, nav).map(|o| o.index), Some(0));
        assert_eq!(previous_in_list(items, None, nav).map(|o| o.index), Some(2));
        assert_eq!(labels(&options), vec!["a", "b", "c"]);
    }

    #[test]
    fn allow_empty_stops_at_the_edges() {
        let options = Options::from_strings(["a", "b"]);
        let nav = NavOptions::new(&never).allow_empty(true);
        assert!(next_in_list(options.as_slice(), Some(1), nav).is_none());
        assert!(previous_in_list(options.as_slice(), Some(0), nav).is_none());
        assert_eq!(
            next_in_list(options.as_slice(), None, nav).map(|o| o.index),
            Some(0)
        );
    }

    #[test]
    fn next_of_previous_round_trips() {
        let options = Options::from_strings(["a", "b", "c", "d"]);
        let items = options.as_slice();
        let nav = NavOptions::new(&never);
        for i in 0..items.len() {
            let prev = previous_in_list(items, Some(i), nav).expect("previous");
            let back = next_in_list(items, Some(prev.index), nav).expect("next");
            assert_eq!(back, &items[i]);
        }
    }

    #[test]
    fn disabled_options_are_never_landed_on() {
        let options = Options::from_raw(&[
            json!({ "label": "Lemon", "disabled": true }),
            json!("Lime"),
            json!("Orange"),
        ]);
        let items = options.as_slice();
        let nav = NavOptions::new(&skip_unselectable);
        let mut current = None;
        for _ in 0..10 {
            let next = next_in_list(items, current, nav).expect("next");
            assert_ne!(next.label, "Lemon");
            current = Some(next.index);
        }
        for start in 0..items.len() {
            let prev = previous_in_list(items, Some(start), nav).expect("previous");
            assert_ne!(prev.label, "Lemon");
        }
    }

    #[test]
    fn all_skipped_returns_the_starting_option() {
        let options = Options::from_raw(&[
            json!({ "label": "a", "disabled": true }),
            json!({ "label": "b", "disabled": true }),
        ]);
        let items = options.as_slice();
        let nav = NavOptions::new(&skip_unselectable);
        assert_eq!(next_in_list(items, Some(1), nav).map(|o| o.index), Some(1));
        assert_eq!(previous_in_list(items, Some(0), nav).map(|o| o.index), Some(0));
        assert_eq!(next_in_list(items, None, nav).map(|o| o.index), Some(0));
        assert!(next_in_list(items, None, nav.allow_empty(true)).is_none());
    }

    #[test]
    fn group_headers_are_skipped() {
        let options = Options::from_raw(&[
            json!({ "label": "Apple", "group": "Fruit" }),
            json!({ "label": "Leek", "group": "Veg" }),
        ]);
        let nav = NavOptions::new(&skip_unselectable);
        let first = next_in_list(options.as_slice(), None, nav).expect("first");
        assert_eq!(first.label, "Apple");
        let next = next_in_list(options.as_slice(), Some(first.index), nav).expect("next");
        assert_eq!(next.label, "Leek");
    }

    #[test]
    fn empty_list_yields_nothing() {
        let nav = NavOptions::new(&never);
        assert!(next_in_list(&[], None, nav).is_none());
        assert!(previous_in_list(&[], Some(3), nav).is_none());
    }

    struct Rows {
        row: f64,
        height: Option<f64>,
    }

    impl ListGeometry for Rows {
        fn listbox_height(&self) -> Option<f64> {
            self.height
        }

        fn option_bounds(&self, key: &str) -> Option<Bounds> {
            let index: usize = key.rsplit('_').next()?.parse().ok()?;
            Some(Bounds::new(index as f64 * self.row, self.row))
        }
    }

    fn numbered(count: usize) -> Options {
        let raw: Vec<_> = (0..count).map(|i| json!({ "id": i, "label": format!("Item {i}") })).collect();
        Options::builder(&raw).with_id_prefix("row").build()
    }

    #[test]
    fn page_down_lands_on_the_last_option_within_one_page() {
        let options = numbered(20);
        let items = options.as_slice();
        let geometry = Rows { row: 20.0, height: Some(100.0) };
        let next = move_page(PageDirection::Down, items, Some(&items[0]), &geometry, &never);
        assert_eq!(next.map(|o| o.index), Some(4));
        let prev = move_page(PageDirection::Up, items, Some(&items[10]), &geometry, &never);
        assert_eq!(prev.map(|o| o.index), Some(6));
    }

    #[test]
    fn page_stops_at_list_edges() {
        let options = numbered(3);
        let items = options.as_slice();
        let geometry = Rows { row: 20.0, height: Some(100.0) };
        let next = move_page(PageDirection::Down, items, Some(&items[1]), &geometry, &never);
        assert_eq!(next.map(|o| o.index), Some(2));
        let stay = move_page(PageDirection::Down, items, Some(&items[2]), &geometry, &never);
        assert_eq!(stay.map(|o| o.index), Some(2));
    }

    #[test]
    fn page_falls_back_without_geometry() {
        let options = numbered(8);
        let items = options.as_slice();
        let geometry = Rows { row: 20.0, height: None };
        let down = move_page(PageDirection::Down, items, Some(&items[2]), &geometry, &never);
        assert_eq!(down.map(|o| o.index), Some(7));
        let up = move_page(PageDirection::Up, items, Some(&items[5]), &geometry, &never);
        assert_eq!(up.map(|o| o.index), Some(0));
    }
}
