//! Instruction template for a single sales-call turn.
//!
//! The instruction is a flat block of `Label: value` lines built from the
//! form selection, followed by the objection-handling steps, an optional
//! reference excerpt, and the representative's message. Values are inserted
//! verbatim; the selection must already be validated against the catalog.

use salescall_types::chat::ReferenceDocument;
use salescall_types::selection::{Selection, SelectionField};

/// APACT objection-handling steps, used only as literal template text.
pub const APACT_STEPS: [&str; 5] = ["Acknowledge", "Probe", "Answer", "Confirm", "Transition"];

/// Builds the user instruction sent alongside the system preamble.
///
/// Layout:
/// ```text
/// Language: English
/// Brand: Shingrix
/// RACE segment: Reach
/// Objection barriers: none stated
/// Call objective: ...
/// HCP specialty: ...
/// HCP persona: ...
/// Response length: ...
/// Response tone: ...
///
/// Handle any objection with the APACT flow: Acknowledge -> Probe -> ...
///
/// Reference material (Shingrix.pdf): first N chars...
///
/// User input: {user_text}
/// ```
pub struct InstructionBuilder {
    excerpt_chars: usize,
}

impl InstructionBuilder {
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    pub fn build(
        &self,
        selection: &Selection,
        user_text: &str,
        reference: Option<&ReferenceDocument>,
    ) -> String {
        let mut lines = Vec::with_capacity(SelectionField::ALL.len() + 6);

        for field in SelectionField::ALL {
            let values = selection.values(field);
            let rendered = if values.is_empty() {
                "none stated".to_string()
            } else {
                values.join(", ")
            };
            lines.push(format!("{}: {rendered}", field.label()));
        }

        lines.push(String::new());
        lines.push(format!(
            "Handle any objection with the APACT flow: {}. \
             Answer in {} with a {} tone and keep the response {}.",
            APACT_STEPS.join(" -> "),
            selection.language,
            selection.tone.to_lowercase(),
            selection.length.to_lowercase(),
        ));

        if let Some(doc) = reference {
            let excerpt = doc.excerpt(self.excerpt_chars).trim();
            if !excerpt.is_empty() {
                lines.push(String::new());
                lines.push(format!("Reference material ({}): {excerpt}...", doc.file_name));
            }
        }

        lines.push(String::new());
        lines.push(format!("User input: {user_text}"));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salescall_types::chat::DocumentKind;
    use salescall_types::selection::OptionCatalog;

    fn selection() -> Selection {
        let catalog = OptionCatalog::default();
        let mut selection = catalog.default_selection().unwrap();
        selection.barriers = vec![catalog.barriers[1].clone(), catalog.barriers[3].clone()];
        selection.persona = catalog.personas[2].clone();
        selection
    }

    #[test]
    fn test_contains_every_selection_value_verbatim() {
        let selection = selection();
        let user_text = "Dr. Lee says <the vaccine> is \"too new\" & costly";
        let instruction = InstructionBuilder::new(500).build(&selection, user_text, None);

        for field in SelectionField::ALL {
            for value in selection.values(field) {
                assert!(
                    instruction.contains(value),
                    "missing {field} value '{value}' in:\n{instruction}"
                );
            }
        }
        assert!(instruction.contains(user_text));
        assert!(instruction.ends_with(&format!("User input: {user_text}")));
    }

    #[test]
    fn test_no_barriers_renders_placeholder() {
        let mut selection = selection();
        selection.barriers.clear();
        let instruction = InstructionBuilder::new(500).build(&selection, "hi", None);
        assert!(instruction.contains("Objection barriers: none stated"));
    }

    #[test]
    fn test_mentions_apact_steps_in_order() {
        let instruction = InstructionBuilder::new(500).build(&selection(), "hi", None);
        assert!(instruction.contains("Acknowledge -> Probe -> Answer -> Confirm -> Transition"));
    }

    #[test]
    fn test_reference_excerpt_is_clipped() {
        let doc = ReferenceDocument {
            file_name: "Shingrix.pdf".to_string(),
            kind: DocumentKind::Pdf,
            text: format!("{}{}", "A".repeat(10), "Z".repeat(10)),
        };
        let instruction = InstructionBuilder::new(10).build(&selection(), "hi", Some(&doc));
        assert!(instruction.contains("Reference material (Shingrix.pdf): AAAAAAAAAA..."));
        assert!(!instruction.contains("ZZ"));
    }

    #[test]
    fn test_blank_reference_is_omitted() {
        let doc = ReferenceDocument {
            file_name: "blank.txt".to_string(),
            kind: DocumentKind::Text,
            text: "   ".to_string(),
        };
        let instruction = InstructionBuilder::new(500).build(&selection(), "hi", Some(&doc));
        assert!(!instruction.contains("Reference material"));
    }
}
