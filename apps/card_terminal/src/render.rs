use card_core::{CardView, SessionStatus};

pub const LOADING_TEXT: &str = "Loading.....";

pub fn render_card(view: &CardView) -> String {
    match &view.status {
        SessionStatus::Loading => return LOADING_TEXT.to_string(),
        SessionStatus::Failed(message) => return format!("Error: {message}"),
        SessionStatus::Ready => {}
    }

    let mut lines = Vec::new();
    if !view.phase_class().is_empty() {
        lines.push(format!("[{}]", view.phase_class()));
    }
    lines.push(format!("{} ({})", view.display_name, view.age_text));
    if view.image_count == 0 {
        lines.push(format!("image: {}", view.image_file));
    } else {
        lines.push(format!(
            "image: {} ({}/{})",
            view.image_file,
            view.position + 1,
            view.image_count
        ));
        lines.push(format!("       {}", progress_bar(&view.progress)));
    }
    lines.push(format!("reactions: {}", view.reaction_count));
    if !view.can_randomize {
        lines.push("(no other profiles to show)".to_string());
    }
    lines.join("\n")
}

fn progress_bar(progress: &[bool]) -> String {
    progress
        .iter()
        .map(|&active| if active { '#' } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use card_core::AnimationPhase;

    use super::*;

    fn ready_view() -> CardView {
        CardView {
            status: SessionStatus::Ready,
            phase: AnimationPhase::Idle,
            display_name: "Ada".to_string(),
            age_text: "34".to_string(),
            image_file: "IMG_0002.JPG".to_string(),
            image_count: 3,
            position: 1,
            progress: vec![false, true, false],
            reaction_count: 2,
            can_randomize: true,
            can_navigate: true,
        }
    }

    #[test]
    fn ready_card_lists_name_image_and_reactions() {
        assert_eq!(
            render_card(&ready_view()),
            "Ada (34)\nimage: IMG_0002.JPG (2/3)\n       -#-\nreactions: 2"
        );
    }

    #[test]
    fn transition_phase_is_shown_above_the_card() {
        let view = CardView {
            phase: AnimationPhase::ExitingOut,
            ..ready_view()
        };
        assert!(render_card(&view).starts_with("[fly-out]\nAda"));
    }

    #[test]
    fn placeholder_image_has_no_position() {
        let view = CardView {
            image_file: "NOTFOUND.PNG".to_string(),
            image_count: 0,
            position: 0,
            progress: Vec::new(),
            can_navigate: false,
            ..ready_view()
        };
        let text = render_card(&view);
        assert!(text.contains("image: NOTFOUND.PNG\n"), "{text}");
        assert!(!text.contains('#'));
    }

    #[test]
    fn loading_and_failure_replace_the_card() {
        let loading = CardView {
            status: SessionStatus::Loading,
            ..ready_view()
        };
        assert_eq!(render_card(&loading), LOADING_TEXT);

        let failed = CardView {
            status: SessionStatus::Failed("directory unavailable".to_string()),
            ..ready_view()
        };
        assert_eq!(render_card(&failed), "Error: directory unavailable");
    }
}
