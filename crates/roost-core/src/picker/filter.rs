use super::types::PickerItem;

/// Indices of the items matching `query`, in their original order.
///
/// Every whitespace-separated term must occur, case-insensitively, in the
/// label, subtitle or key. An empty query matches everything.
pub fn filter_items(query: &str, items: &[PickerItem]) -> Vec<usize> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            if terms.is_empty() {
                return true;
            }
            let haystack =
                format!("{} {} {}", item.label, item.subtitle, item.key).to_lowercase();
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .map(|(index, _)| index)
        .collect()
}
