use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

struct Feature {
    icon: &'static str,
    title: &'static str,
    blurb: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "fa-solid fa-video",
        title: "Video Analysis",
        blurb: "Our AI meticulously scans video files for artifacts, inconsistencies, and manipulation patterns invisible to the human eye.",
    },
    Feature {
        icon: "fa-solid fa-image",
        title: "Image Scanning",
        blurb: "Detect facial morphing, background tampering, and other signs of digital alteration in still images with high precision.",
    },
    Feature {
        icon: "fa-solid fa-microphone",
        title: "Audio Verification",
        blurb: "Identify synthesized voices and manipulated audio clips by analyzing vocal patterns and background noise signatures.",
    },
];

const STEPS: [(&str, &str); 3] = [
    ("Upload Media", "Securely upload any suspicious file."),
    ("AI Analysis", "Our engine processes it in seconds."),
    ("Get Results", "Receive a clear, actionable report."),
];

/// Public landing view; every call to action routes to the login view.
#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    html! {
        <div class="landing-page">
            <section class="hero">
                <h1>{"Deepfake Guard"}</h1>
                <p class="tagline">
                    {"Unmask the Truth. Protect Your Reality with AI-Powered Deepfake Detection."}
                </p>
                <Link<Route> to={Route::Login}>
                    <button class="cta-btn">{"Get Started Now"}</button>
                </Link<Route>>
            </section>

            <section class="features">
                <h2>{"Advanced Detection Capabilities"}</h2>
                <p class="section-subtitle">{"We analyze every pixel, frame, and sound wave."}</p>
                <div class="feature-grid">
                    { for FEATURES.iter().map(|feature| html! {
                        <div class="feature-card">
                            <i class={feature.icon}></i>
                            <h3>{ feature.title }</h3>
                            <p>{ feature.blurb }</p>
                        </div>
                    })}
                </div>
            </section>

            <section class="how-it-works">
                <h2>{"Simple, Fast, and Effective"}</h2>
                <p class="section-subtitle">{"Three easy steps to a safer digital feed."}</p>
                <div class="steps-row">
                    { for STEPS.iter().enumerate().map(|(index, (title, blurb))| html! {
                        <div class="step">
                            <div class="step-number">{ index + 1 }</div>
                            <h3>{ *title }</h3>
                            <p>{ *blurb }</p>
                        </div>
                    })}
                </div>
            </section>

            <section class="final-cta">
                <h2>{"Ready to Secure Your Feed?"}</h2>
                <p>{"Don't let digital deception compromise your integrity. Join us in the fight for truth and transparency."}</p>
                <Link<Route> to={Route::Login}>
                    <button class="cta-btn">{"Create a Free Account"}</button>
                </Link<Route>>
            </section>
        </div>
    }
}
