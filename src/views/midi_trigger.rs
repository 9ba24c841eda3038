// Copyright (c) 2024 Mike Tsao

use super::ModuleView;
use crate::{
    cores::MIDI_TRIGGER_SLOT_COUNT,
    prelude::*,
    types::{mm_to_px, RACK_GRID_HEIGHT, RACK_GRID_WIDTH},
    util::{AssetPaths, ReadOnlyAssetPath},
};

/// One cell of the 4x4 note grid. Shows the note its slot is mapped to, or
/// "LRN" while that slot is learning.
#[derive(Debug)]
pub struct NoteChoice {
    bounds: WidgetBox,
    slot: usize,
    text: String,
    alpha: f32,
}
impl NoteChoice {
    /// Shown in place of the note name while learning.
    pub const LEARNING_TEXT: &'static str = "LRN";

    fn new_with(slot: usize, bounds: WidgetBox) -> Self {
        Self {
            bounds,
            slot,
            text: String::default(),
            alpha: 1.0,
        }
    }

    #[allow(missing_docs)]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[allow(missing_docs)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1.0 normally, dimmed while learning.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    fn refresh(&mut self, module: &dyn Module) {
        if module.learning_slot() == Some(self.slot) {
            self.text = Self::LEARNING_TEXT.to_string();
            self.alpha = 0.5;
        } else {
            self.text = module
                .learnable_notes()
                .get(self.slot)
                .map(|note| note.label())
                .unwrap_or_default();
            self.alpha = 1.0;
        }
    }
}
impl Widget for NoteChoice {
    fn bounds(&self) -> &WidgetBox {
        &self.bounds
    }

    fn bounds_mut(&mut self) -> &mut WidgetBox {
        &mut self.bounds
    }
}

/// The panel for [MidiTriggerToCv](crate::modules::MidiTriggerToCv): a grid
/// of sixteen note choices above sixteen output jacks.
///
/// Selecting a choice puts its slot into learn mode, and the next note played
/// is assigned to it. Once the module has learned the note, the selection
/// clears itself.
#[derive(Debug)]
pub struct MidiTriggerPanel {
    artwork: ReadOnlyAssetPath,
    bounds: WidgetBox,
    output_ports: [Vec2; MIDI_TRIGGER_SLOT_COUNT],
    choices: Vec<NoteChoice>,
    selected: Option<usize>,
}
impl Default for MidiTriggerPanel {
    fn default() -> Self {
        Self::new_with(AssetPaths::global())
    }
}
impl MidiTriggerPanel {
    /// Panel width in rack units.
    pub const HP: f32 = 10.0;

    /// Where the panel artwork lives beneath the system root.
    pub const ARTWORK: &'static str = "res/Core/MIDITriggerToCVInterface.svg";

    // Top-left corner of each output jack, in millimeters, four to a row.
    const OUTPUT_PORT_COLUMNS_MM: [f32; 4] = [3.894335, 15.494659, 27.094982, 38.693932];
    const OUTPUT_PORT_ROWS_MM: [f32; 4] = [73.344704, 84.945023, 96.543976, 108.14429];

    const GRID_POS_MM: (f32, f32) = (3.399621, 14.837339);
    const GRID_SIZE_MM: (f32, f32) = (44.0, 54.667);
    const CHOICE_HEIGHT_MM: f32 = 6.666;

    /// Creates a panel whose artwork is resolved against `paths`.
    pub fn new_with(paths: &AssetPaths) -> Self {
        let output_ports = core::array::from_fn(|i| {
            Vec2::from_mm(
                Self::OUTPUT_PORT_COLUMNS_MM[i % 4],
                Self::OUTPUT_PORT_ROWS_MM[i / 4],
            )
        });

        // The choices fill the bottom of the grid area, four rows of four.
        let grid = WidgetBox::new(
            Vec2::from_mm(Self::GRID_POS_MM.0, Self::GRID_POS_MM.1),
            Vec2::from_mm(Self::GRID_SIZE_MM.0, Self::GRID_SIZE_MM.1),
        );
        let choice_size = Vec2::new(grid.size.x / 4.0, mm_to_px(Self::CHOICE_HEIGHT_MM));
        let choices = (0..MIDI_TRIGGER_SLOT_COUNT)
            .map(|slot| {
                let row_from_bottom = (4 - slot / 4) as f32;
                let pos = Vec2::new(
                    grid.pos.x + (slot % 4) as f32 * choice_size.x,
                    grid.end().y - row_from_bottom * choice_size.y,
                );
                NoteChoice::new_with(slot, WidgetBox::new(pos, choice_size))
            })
            .collect();

        Self {
            artwork: paths.system(Self::ARTWORK),
            bounds: WidgetBox::new(
                Vec2::ZERO,
                Vec2::new(Self::HP * RACK_GRID_WIDTH, RACK_GRID_HEIGHT),
            ),
            output_ports,
            choices,
            selected: None,
        }
    }

    /// The panel's SVG artwork.
    pub fn artwork(&self) -> &ReadOnlyAssetPath {
        &self.artwork
    }

    #[allow(missing_docs)]
    pub fn bounds(&self) -> &WidgetBox {
        &self.bounds
    }

    /// Where each output jack sits on the panel, in pixels.
    pub fn output_ports(&self) -> &[Vec2; MIDI_TRIGGER_SLOT_COUNT] {
        &self.output_ports
    }

    #[allow(missing_docs)]
    pub fn choices(&self) -> &[NoteChoice] {
        &self.choices
    }

    /// The choice that currently has focus.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Focuses a choice, which starts learning into its slot.
    pub fn select(&mut self, slot: usize, module: &mut dyn Module) {
        if slot < self.choices.len() {
            self.selected = Some(slot);
            module.begin_learning(slot);
        }
    }

    /// Drops focus, which cancels any learning.
    pub fn deselect(&mut self, module: &mut dyn Module) {
        if self.selected.take().is_some() {
            module.end_learning();
        }
    }
}
impl ModuleView for MidiTriggerPanel {
    fn step(&mut self, module: &mut dyn Module) {
        for choice in self.choices.iter_mut() {
            choice.refresh(module);
        }
        if let Some(slot) = self.selected {
            if module.learning_slot() != Some(slot) {
                self.selected = None;
            }
        }
    }

    #[cfg(feature = "egui")]
    fn ui(&mut self, ui: &mut eframe::egui::Ui, module: &mut dyn Module) -> eframe::egui::Response {
        let mut clicked = None;
        let response = ui
            .vertical(|ui| {
                ui.strong(module.name());
                eframe::egui::Grid::new(ui.id().with("note-choices")).show(ui, |ui| {
                    for row in self.choices.chunks(4) {
                        for choice in row {
                            let text = eframe::egui::RichText::new(choice.text())
                                .color(ui.visuals().text_color().gamma_multiply(choice.alpha()));
                            if ui
                                .selectable_label(self.selected == Some(choice.slot()), text)
                                .clicked()
                            {
                                clicked = Some(choice.slot());
                            }
                        }
                        ui.end_row();
                    }
                });
                ui.horizontal_wrapped(|ui| {
                    for voltage in module.outputs() {
                        ui.add(egui::jack_indicator(*voltage));
                    }
                });
            })
            .response;

        if let Some(slot) = clicked {
            if self.selected == Some(slot) {
                self.deselect(module);
            } else {
                self.select(slot, module);
            }
        }

        let menu = self.context_menu(module);
        response.context_menu(|ui| {
            for (index, row) in menu.rows().iter().enumerate() {
                match row {
                    crate::ui::MenuRow::Separator => {
                        ui.separator();
                    }
                    crate::ui::MenuRow::Item {
                        text,
                        right_text,
                        action,
                    } => {
                        if action.is_some() {
                            if ui.button(format!("{text}  {right_text}")).clicked() {
                                menu.activate(index, module);
                                ui.close_menu();
                            }
                        } else {
                            ui.label(text);
                        }
                    }
                }
            }
        });

        response
    }
}

#[cfg(feature = "egui")]
mod egui {
    use crate::types::Voltage;

    /// Draws an output jack that glows in proportion to its voltage.
    pub(super) fn jack_indicator(voltage: Voltage) -> impl eframe::egui::Widget + 'static {
        move |ui: &mut eframe::egui::Ui| {
            let (rect, response) = ui.allocate_exact_size(
                eframe::egui::vec2(12.0, 12.0),
                eframe::egui::Sense::hover(),
            );
            if ui.is_rect_visible(rect) {
                let how_on = (voltage.0 / Voltage::GATE_HIGH.0).clamp(0.0, 1.0);
                ui.painter().circle(
                    rect.center(),
                    rect.width() / 2.0 - 1.0,
                    ui.visuals().strong_text_color().linear_multiply(how_on),
                    ui.visuals().window_stroke,
                );
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cores::MidiTriggerCore,
        midi::MidiInputMessage,
        modules::MidiTriggerToCv,
    };
    use float_cmp::approx_eq;
    use std::path::{Path, PathBuf};

    fn new_pair() -> (MidiTriggerPanel, MidiTriggerToCv) {
        let paths = AssetPaths::new_with(PathBuf::from("/sys"), PathBuf::from("/home"));
        (
            MidiTriggerPanel::new_with(&paths),
            MidiTriggerToCv::new_with(Uid(1), MidiTriggerCore::default()),
        )
    }

    #[test]
    fn layout_matches_artwork() {
        let (panel, _) = new_pair();
        assert_eq!(
            panel.artwork().as_path(),
            Path::new("/sys/res/Core/MIDITriggerToCVInterface.svg")
        );
        assert_eq!(panel.bounds().size, Vec2::new(150.0, 380.0));

        let ports = panel.output_ports();
        assert!(approx_eq!(f32, ports[0].x, mm_to_px(3.894335)));
        assert!(approx_eq!(f32, ports[0].y, mm_to_px(73.344704)));
        assert!(approx_eq!(f32, ports[15].x, mm_to_px(38.693932)));
        assert!(approx_eq!(f32, ports[15].y, mm_to_px(108.14429)));
        assert_eq!(ports[5].y, ports[4].y, "jacks come four to a row");

        let choices = panel.choices();
        assert_eq!(choices.len(), MIDI_TRIGGER_SLOT_COUNT);
        assert_eq!(choices[1].bounds().pos.y, choices[0].bounds().pos.y);
        assert!(choices[4].bounds().pos.y > choices[0].bounds().pos.y);
        assert!(approx_eq!(
            f32,
            choices[15].bounds().end().y,
            mm_to_px(14.837339) + mm_to_px(54.667),
            epsilon = 0.001
        ));
    }

    #[test]
    fn choices_show_note_names_or_learning() {
        let (mut panel, mut module) = new_pair();
        panel.step(&mut module);
        assert_eq!(panel.choices()[0].text(), "C2");
        assert_eq!(panel.choices()[15].text(), "D#3");

        panel.select(3, &mut module);
        panel.step(&mut module);
        assert_eq!(panel.choices()[3].text(), NoteChoice::LEARNING_TEXT);
        assert_eq!(panel.choices()[3].alpha(), 0.5);
        assert_eq!(panel.choices()[2].alpha(), 1.0);
    }

    #[test]
    fn selection_drives_learning() {
        let (mut panel, mut module) = new_pair();
        panel.select(6, &mut module);
        assert_eq!(module.learning_slot(), Some(6));
        assert_eq!(panel.selected(), Some(6));

        panel.select(2, &mut module);
        assert_eq!(module.learning_slot(), Some(2), "one slot learns at a time");

        panel.deselect(&mut module);
        assert_eq!(module.learning_slot(), None);
        assert_eq!(panel.selected(), None);

        panel.select(MIDI_TRIGGER_SLOT_COUNT, &mut module);
        assert_eq!(panel.selected(), None);
        assert_eq!(module.learning_slot(), None);
    }

    #[test]
    fn selection_clears_after_learning() {
        let (mut panel, mut module) = new_pair();
        panel.select(9, &mut module);
        panel.step(&mut module);
        assert_eq!(panel.selected(), Some(9), "still waiting for a note");

        module
            .midi_input()
            .push(MidiInputMessage::new_note_on(MidiChannel(0), 64, 90));
        module.tick(Seconds(0.0004));
        panel.step(&mut module);
        assert_eq!(panel.selected(), None);
        assert_eq!(panel.choices()[9].text(), "E4");
        assert_eq!(panel.choices()[9].alpha(), 1.0);
    }
}
