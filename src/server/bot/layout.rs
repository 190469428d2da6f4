//! Message component layout with Discord's capacity limits enforced up front.
//!
//! A message holds at most five action rows. A row holds up to five buttons or exactly
//! one select menu. Building a [`ComponentLayout`] fails with `AppError::Validation`
//! instead of letting Discord reject the message after side effects already happened.

use serenity::all::{CreateActionRow, CreateButton, CreateSelectMenu};

use crate::server::error::AppError;

pub const MAX_ROWS: usize = 5;
pub const MAX_BUTTONS_PER_ROW: usize = 5;

/// One action row.
#[derive(Debug, Clone)]
pub enum LayoutRow {
    Buttons(Vec<CreateButton>),
    Select(CreateSelectMenu),
}

#[derive(Debug, Clone, Default)]
pub struct ComponentLayout {
    rows: Vec<LayoutRow>,
}

impl ComponentLayout {
    /// Validates explicit rows.
    ///
    /// # Returns
    /// - `Ok(ComponentLayout)` - Every row and the row count fit
    /// - `Err(AppError::Validation)` - Too many rows, or a button row that is empty or
    ///   holds more than five buttons
    pub fn new(rows: Vec<LayoutRow>) -> Result<Self, AppError> {
        if rows.len() > MAX_ROWS {
            return Err(AppError::Validation(format!(
                "Limite de {} linhas de componentes excedido ({}).",
                MAX_ROWS,
                rows.len()
            )));
        }

        for row in &rows {
            if let LayoutRow::Buttons(buttons) = row {
                if buttons.is_empty() || buttons.len() > MAX_BUTTONS_PER_ROW {
                    return Err(AppError::Validation(format!(
                        "Cada linha aceita de 1 a {} botões ({}).",
                        MAX_BUTTONS_PER_ROW,
                        buttons.len()
                    )));
                }
            }
        }

        Ok(Self { rows })
    }

    /// Packs buttons five per row.
    pub fn buttons(buttons: Vec<CreateButton>) -> Result<Self, AppError> {
        Self::new(pack_buttons(buttons))
    }

    /// Selects first, one per row, followed by the buttons packed five per row.
    pub fn selects_then_buttons(
        selects: Vec<CreateSelectMenu>,
        buttons: Vec<CreateButton>,
    ) -> Result<Self, AppError> {
        let mut rows: Vec<LayoutRow> = selects.into_iter().map(LayoutRow::Select).collect();
        rows.extend(pack_buttons(buttons));

        Self::new(rows)
    }

    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    pub fn into_components(self) -> Vec<CreateActionRow> {
        self.rows
            .into_iter()
            .map(|row| match row {
                LayoutRow::Buttons(buttons) => CreateActionRow::Buttons(buttons),
                LayoutRow::Select(select) => CreateActionRow::SelectMenu(select),
            })
            .collect()
    }
}

fn pack_buttons(buttons: Vec<CreateButton>) -> Vec<LayoutRow> {
    let mut rows = Vec::new();
    let mut current = Vec::new();

    for button in buttons {
        current.push(button);
        if current.len() == MAX_BUTTONS_PER_ROW {
            rows.push(LayoutRow::Buttons(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        rows.push(LayoutRow::Buttons(current));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::CreateSelectMenuKind;

    fn buttons(count: usize) -> Vec<CreateButton> {
        (0..count)
            .map(|i| CreateButton::new(format!("b{}", i)).label(format!("{}", i)))
            .collect()
    }

    fn select(id: &str) -> CreateSelectMenu {
        CreateSelectMenu::new(
            id,
            CreateSelectMenuKind::Role {
                default_roles: None,
            },
        )
    }

    #[test]
    fn twenty_five_buttons_fit() {
        let layout = ComponentLayout::buttons(buttons(25)).unwrap();

        assert_eq!(layout.rows().len(), 5);
        assert!(layout
            .rows()
            .iter()
            .all(|row| matches!(row, LayoutRow::Buttons(b) if b.len() == 5)));
    }

    #[test]
    fn twenty_six_buttons_are_rejected() {
        assert!(matches!(
            ComponentLayout::buttons(buttons(26)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn select_takes_a_whole_row() {
        let layout =
            ComponentLayout::selects_then_buttons(vec![select("a"), select("b")], buttons(3))
                .unwrap();

        assert_eq!(layout.rows().len(), 3);
        assert!(matches!(layout.rows()[0], LayoutRow::Select(_)));
        assert!(matches!(layout.rows()[1], LayoutRow::Select(_)));
        assert!(matches!(&layout.rows()[2], LayoutRow::Buttons(b) if b.len() == 3));
    }

    #[test]
    fn selects_count_against_row_limit() {
        let selects = (0..5).map(|i| select(&i.to_string())).collect();

        assert!(matches!(
            ComponentLayout::selects_then_buttons(selects, buttons(1)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn oversized_explicit_row_is_rejected() {
        assert!(ComponentLayout::new(vec![LayoutRow::Buttons(buttons(6))]).is_err());
        assert!(ComponentLayout::new(vec![LayoutRow::Buttons(vec![])]).is_err());
    }
}
