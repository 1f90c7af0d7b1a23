//! Plain-text rendering of analysis view models.

use std::fmt;

use crate::analysis::{AnalysisViewModel, ThematicReport};

/// Render a view model the way the browser panel lays it out.
pub fn render_view_model(view: &AnalysisViewModel) -> String {
    ViewModelText(view).to_string()
}

/// Text layout of a view model.
pub struct ViewModelText<'a>(pub &'a AnalysisViewModel);

impl fmt::Display for ViewModelText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let heading = format!("{} Analysis", view.analysis_type().label());
        writeln!(f, "{}", heading)?;
        writeln!(f, "{}", "=".repeat(heading.len()))?;

        writeln!(f, "Key:            {}", view.key.as_deref().unwrap_or("-"))?;
        writeln!(f, "Tempo:          {} BPM", view.tempo)?;
        writeln!(f, "Time signature: {}", view.time_signature)?;
        writeln!(f, "Instruments:    {}", view.instruments.join(", "))?;

        writeln!(f, "\nStructure")?;
        let total = view.total_duration();
        for section in &view.sections {
            writeln!(
                f,
                "  {:<12} {:.1}s - {:.1}s ({:.0}%)",
                section.name,
                section.start,
                section.end,
                section.width_fraction(total) * 100.0
            )?;
        }

        if !view.report.is_empty() {
            writeln!(f)?;
            write_report(f, &view.report)?;
        }

        if let Some(suggestions) = &view.suggestions {
            writeln!(f, "\nSuggestions")?;
            for suggestion in suggestions {
                writeln!(f, "  - {}", suggestion)?;
            }
        }

        writeln!(f, "\n{}", view.insight)
    }
}

fn write_report(f: &mut fmt::Formatter<'_>, report: &ThematicReport) -> fmt::Result {
    match report {
        ThematicReport::General(r) => {
            field(f, "Genre", r.genre.as_deref())?;
            field(f, "Sound quality", r.sound_quality.as_deref())
        }
        ThematicReport::MusicTheory(r) => {
            list(f, "Scale", r.scale.as_deref(), " ")?;
            list(f, "Chords", r.chord_progression.as_deref(), " - ")?;
            field(f, "Harmony", r.harmonic_analysis.as_deref())
        }
        ThematicReport::ProductionFeedback(r) => {
            field(f, "Mix balance", r.mix_balance.as_deref())?;
            bullets(f, "EQ", r.eq_recommendations.as_deref())?;
            bullets(f, "Dynamics", r.dynamics_suggestions.as_deref())?;
            bullets(f, "Spatial", r.spatial_recommendations.as_deref())
        }
        ThematicReport::ArrangementAnalysis(r) => {
            field(f, "Instrumentation", r.instrumentation.as_deref())?;
            field(f, "Energy flow", r.energy_flow.as_deref())
        }
    }
}

fn field(f: &mut fmt::Formatter<'_>, label: &str, value: Option<&str>) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "{}: {}", label, value),
        None => Ok(()),
    }
}

fn list(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    values: Option<&[String]>,
    separator: &str,
) -> fmt::Result {
    match values {
        Some(values) => writeln!(f, "{}: {}", label, values.join(separator)),
        None => Ok(()),
    }
}

fn bullets(f: &mut fmt::Formatter<'_>, label: &str, values: Option<&[String]>) -> fmt::Result {
    let Some(values) = values else {
        return Ok(());
    };
    writeln!(f, "{}:", label)?;
    for value in values {
        writeln!(f, "  - {}", value)?;
    }
    Ok(())
}
