use shared::data::StatusSummary;

/// One parking space as the desk shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCell {
    pub slot: u32,
    pub vip: bool,
    /// Number of the vehicle parked here, if any.
    pub occupant: Option<String>,
}

impl SlotCell {
    #[must_use]
    pub fn label(&self) -> String {
        let marker = if self.vip { "*" } else { " " };
        match &self.occupant {
            Some(number) => format!("{marker}{:>2} {number}", self.slot),
            None => format!("{marker}{:>2} free", self.slot),
        }
    }
}

/// Largest lot the desk will draw.
pub const MAX_SLOTS: u32 = 1024;

/// Lays out slots `1..=total_slots`, at most [`MAX_SLOTS`] of them. Servers that leave out
/// `total_slots` get the sum of the counts.
#[must_use]
pub fn slot_grid(status: &StatusSummary) -> Vec<SlotCell> {
    let total = if status.total_slots == 0 {
        status.occupied_count.saturating_add(status.free_count)
    } else {
        status.total_slots
    }
    .min(MAX_SLOTS);

    (1..=total)
        .map(|slot| SlotCell {
            slot,
            vip: status.vip_slots.contains(&slot),
            occupant: status
                .occupied
                .iter()
                .find(|vehicle| vehicle.slot == slot)
                .map(|vehicle| vehicle.number.clone()),
        })
        .collect()
}

/// Renders the grid as text lines of `per_row` cells each.
#[must_use]
pub fn text_rows(cells: &[SlotCell], per_row: usize) -> Vec<String> {
    cells
        .chunks(per_row.max(1))
        .map(|row| {
            row.iter()
                .map(|cell| format!("[{:<16}]", cell.label()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
