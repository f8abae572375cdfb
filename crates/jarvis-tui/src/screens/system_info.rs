//! System info overlay.
//!
//! Server health, agent roster, and environment details fetched from the
//! backend, shown over the chat screen.

use crate::app::{App, SystemInfoState};
use crate::ui::theme::{health_indicator, Health, Styles, Symbols};
use crate::ui::{centered_rect, widgets::KeyHint, widgets::StatusBar};
use jarvis_client::format::{format_millis_f64, format_uptime};
use jarvis_client::{AgentInfo, ClientConfig, SystemStatus};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Capabilities shown per agent before collapsing into a "+N more" tag.
const MAX_CAPABILITY_TAGS: usize = 3;

/// Render the system info overlay on top of the chat screen.
pub fn render_system_info_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let overlay_area = centered_rect(80, 80, area);
    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" System Information ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let inner = block.inner(overlay_area);
    block.render(overlay_area, buf);

    let lines = overlay_lines(&app.system_info, &app.config, app.spinner_frame());

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    paragraph.render(inner, buf);

    // Status bar along the bottom edge of the overlay
    if inner.height > 1 {
        let bar_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        let hints = vec![
            KeyHint::new("^R", "Refresh"),
            KeyHint::new("Esc", "Close"),
        ];
        StatusBar::new("System").hints(hints).render(bar_area, buf);
    }
}

fn overlay_lines(
    state: &SystemInfoState,
    config: &ClientConfig,
    spinner: &'static str,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.loading && state.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(spinner.to_string(), Styles::dim()),
            Span::styled(" Loading system information...", Styles::dim()),
        ]));
        return lines;
    }

    if let Some(error) = &state.error {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("{} {error}", Symbols::ERROR),
            Styles::error(),
        ));
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Press Ctrl+R to retry.".to_string(),
            Styles::dim(),
        ));
        return lines;
    }

    if let Some(health) = &state.health {
        lines.extend(health_lines(health));
    }

    if let Some(agents) = &state.agents {
        lines.extend(agent_lines(agents));
    }

    lines.extend(environment_lines(config));
    lines
}

fn health_lines(health: &SystemStatus) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::styled("Server Status".to_string(), Styles::title()));

    let overall = if health.status == "healthy" {
        Health::Healthy
    } else {
        Health::Warning
    };
    lines.push(indicator_line("Status", &health.status, overall));
    lines.push(Line::from(vec![
        Span::styled("  Uptime     ".to_string(), Styles::dim()),
        Span::styled(format_uptime(health.uptime), Styles::default()),
    ]));
    lines.push(indicator_line(
        "MongoDB",
        &health.mongodb,
        if health.mongodb_healthy() {
            Health::Healthy
        } else {
            Health::Error
        },
    ));
    lines.push(indicator_line(
        "Agents",
        &health.agents,
        if health.agents_healthy() {
            Health::Healthy
        } else {
            Health::Error
        },
    ));
    lines.push(Line::from(""));
    lines
}

fn indicator_line(label: &str, value: &str, health: Health) -> Line<'static> {
    let (symbol, style) = health_indicator(health);
    Line::from(vec![
        Span::styled(format!("  {label:<9}  "), Styles::dim()),
        Span::styled(format!("{symbol} "), style),
        Span::styled(value.to_string(), Styles::default()),
    ])
}

fn agent_lines(info: &AgentInfo) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::styled("Agents".to_string(), Styles::title()));

    lines.push(Line::from(vec![
        Span::styled("  Available        ".to_string(), Styles::dim()),
        Span::styled(info.available_agents.len().to_string(), Styles::default()),
    ]));

    if let Some(stats) = &info.stats {
        lines.push(Line::from(vec![
            Span::styled("  Total tasks      ".to_string(), Styles::dim()),
            Span::styled(stats.total_tasks.to_string(), Styles::default()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Active agents    ".to_string(), Styles::dim()),
            Span::styled(stats.active_agents.len().to_string(), Styles::default()),
        ]));
        let avg = stats
            .avg_processing_time
            .map_or_else(|| "N/A".to_string(), format_millis_f64);
        lines.push(Line::from(vec![
            Span::styled("  Avg processing   ".to_string(), Styles::dim()),
            Span::styled(avg, Styles::default()),
        ]));
        lines.push(Line::from(""));
    }

    for agent in &info.available_agents {
        let status = agent.status.as_deref().unwrap_or("implemented");
        let health = if status == "implemented" {
            Health::Healthy
        } else {
            Health::Warning
        };
        let (symbol, style) = health_indicator(health);
        lines.push(Line::from(vec![
            Span::styled(format!("  {symbol} "), style),
            Span::styled(agent.name.clone(), Styles::assistant()),
            Span::styled(format!("  ({status})"), Styles::dim()),
        ]));
        lines.push(Line::styled(
            format!("    {}", agent.description),
            Styles::default(),
        ));
        if !agent.capabilities.is_empty() {
            lines.push(Line::styled(
                format!("    {}", capability_tags(&agent.capabilities)),
                Styles::dim(),
            ));
        }
        lines.push(Line::from(""));
    }

    lines
}

/// First few capabilities plus a "+N more" tag for the rest.
fn capability_tags(capabilities: &[String]) -> String {
    let shown: Vec<&str> = capabilities
        .iter()
        .take(MAX_CAPABILITY_TAGS)
        .map(String::as_str)
        .collect();
    let mut out = shown.join(", ");
    let hidden = capabilities.len().saturating_sub(MAX_CAPABILITY_TAGS);
    if hidden > 0 {
        out.push_str(&format!(", +{hidden} more"));
    }
    out
}

fn environment_lines(config: &ClientConfig) -> Vec<Line<'static>> {
    let entry = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<12}"), Styles::dim()),
            Span::styled(value, Styles::default()),
        ])
    };

    vec![
        Line::styled("Environment".to_string(), Styles::title()),
        entry("App", format!("{} v{}", config.app_name, config.app_version)),
        entry("Mode", config.mode.clone()),
        entry("API base", config.api_base.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarvis_client::api::{AgentStats, AgentSummary};

    fn config() -> ClientConfig {
        ClientConfig::default()
    }

    fn lines_to_text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(std::string::ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_state() {
        let state = SystemInfoState {
            loading: true,
            ..SystemInfoState::default()
        };
        let text = lines_to_text(&overlay_lines(&state, &config(), "|"));
        assert!(text.contains("Loading system information"));
    }

    #[test]
    fn test_error_state_mentions_retry() {
        let state = SystemInfoState {
            error: Some("Failed to fetch system information: connection refused".to_string()),
            ..SystemInfoState::default()
        };
        let text = lines_to_text(&overlay_lines(&state, &config(), "|"));
        assert!(text.contains("Failed to fetch"));
        assert!(text.contains("Ctrl+R to retry"));
    }

    #[test]
    fn test_loaded_state() {
        let state = SystemInfoState {
            health: Some(SystemStatus {
                status: "healthy".to_string(),
                uptime: 3725.0,
                mongodb: "connected".to_string(),
                agents: "initialized".to_string(),
            }),
            agents: Some(AgentInfo {
                available_agents: vec![AgentSummary {
                    name: "research".to_string(),
                    description: "Web research and synthesis".to_string(),
                    status: None,
                    capabilities: vec![
                        "search".to_string(),
                        "summarize".to_string(),
                        "cite".to_string(),
                        "translate".to_string(),
                        "compare".to_string(),
                    ],
                }],
                stats: Some(AgentStats {
                    total_tasks: 42,
                    active_agents: vec!["research".to_string()],
                    avg_processing_time: None,
                }),
            }),
            ..SystemInfoState::default()
        };
        let text = lines_to_text(&overlay_lines(&state, &config(), "|"));
        assert!(text.contains("1h 2m 5s"));
        assert!(text.contains("[ok] connected"));
        assert!(text.contains("research"));
        assert!(text.contains("(implemented)"));
        assert!(text.contains("+2 more"));
        assert!(text.contains("N/A"));
        assert!(text.contains("JarvisAI"));
    }

    #[test]
    fn test_capability_tags_no_overflow() {
        let caps = vec!["a".to_string(), "b".to_string()];
        assert_eq!(capability_tags(&caps), "a, b");
    }
}
