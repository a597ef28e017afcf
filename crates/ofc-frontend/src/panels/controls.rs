//! Control column: sketch mode, dimension inputs, operations, saved sketches

use ofc_cad::{Operation, PARAM_RANGE, RecordShape, SketchMode, SketchParam, SketchRecord};

use crate::state::{AppAction, SharedAppState};

/// Left-hand control panel
#[derive(Default)]
pub struct ControlsPanel;

impl ControlsPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut actions = Vec::new();
        let mut state = app_state.lock();
        let params = state.params;

        ui.heading("Sketch");
        ui.horizontal(|ui| {
            for mode in SketchMode::ALL {
                if ui
                    .selectable_label(params.mode == mode, mode.label())
                    .clicked()
                {
                    actions.push(AppAction::SetMode(mode));
                }
            }
        });

        ui.add_space(4.0);
        egui::Grid::new("sketch_params")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for param in SketchParam::ALL {
                    ui.label(format!("{}:", param.label()));
                    let mut value = params.get(param);
                    if ui
                        .add(egui::DragValue::new(&mut value).range(PARAM_RANGE))
                        .changed()
                    {
                        actions.push(AppAction::SetParam { param, value });
                    }
                    ui.end_row();
                }
            });

        ui.separator();
        ui.heading("Operation");
        let full_width = egui::vec2(ui.available_width(), 0.0);
        for operation in Operation::ALL {
            let button = egui::Button::new(format!("Use {}", operation.label()))
                .selected(params.operation == operation)
                .min_size(full_width);
            if ui.add(button).clicked() {
                actions.push(AppAction::SetOperation(operation));
            }
        }

        ui.separator();
        if ui
            .add(egui::Button::new("Save Sketch").min_size(full_width))
            .clicked()
        {
            actions.push(AppAction::SaveSketch);
        }

        ui.add_space(4.0);
        ui.label("Saved Sketches");
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if state.library.is_empty() {
                        ui.weak("No saved sketches");
                    }
                    for sketch in state.library.sketches() {
                        let response = ui
                            .selectable_label(false, &sketch.name)
                            .on_hover_text(record_summary(&sketch.params));
                        if response.clicked() {
                            actions.push(AppAction::LoadSketch(sketch.name.clone()));
                        }
                    }
                });
        });

        for action in actions {
            state.queue_action(action);
        }
    }
}

/// One-line description of a saved sketch for tooltips
fn record_summary(record: &SketchRecord) -> String {
    let profile = match record.shape {
        RecordShape::Rectangle { width, height } => format!("Rectangle {} x {}", width, height),
        RecordShape::Circle { radius } => format!("Circle r{}", radius),
    };
    format!(
        "{}, depth {}, {}",
        profile,
        record.depth,
        record.operation.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_summary() {
        let record = SketchRecord {
            depth: 30,
            operation: Operation::Revolve,
            shape: RecordShape::Circle { radius: 25 },
        };
        assert_eq!(record_summary(&record), "Circle r25, depth 30, Revolve");
    }
}
