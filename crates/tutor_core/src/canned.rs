//! Fixed conversation content used when no completion service is configured.

use crate::Sender;

/// Shown instead of a reply when the completion service fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach the tutor just now. Please try sending your question again.";

pub const STARTER_PROMPTS: [&str; 4] = [
    "What is the derivative of sin(x)?",
    "Explain the chain rule",
    "Help me solve this integral: ∫x²dx",
    "What is a Taylor series?",
];

pub const WELCOME_TRANSCRIPT: [(Sender, &str); 3] = [
    (
        Sender::Assistant,
        "Hello! I'm your math assistant. How can I help you today?",
    ),
    (Sender::User, "Can you help me understand derivatives?"),
    (
        Sender::Assistant,
        "Of course! Derivatives are a fundamental concept in calculus that measure the rate of \
         change of a function. Would you like me to explain the basic concept, or do you have a \
         specific question about derivatives?",
    ),
];

const CANNED_REPLIES: [&str; 2] = [
    "The derivative of a function represents its rate of change at a particular point. For a \
     function f(x), the derivative f'(x) tells you how quickly the output is changing with \
     respect to the input at that point. In physical terms, if f(x) represents position, f'(x) \
     represents velocity. For example, the derivative of f(x) = x² is f'(x) = 2x.",
    "## The power rule\n\
     \n\
     For any real exponent n, **the derivative of x^n is n·x^(n-1)**:\n\
     \n\
     \\[\\frac{d}{dx} x^n = n x^{n-1}\\]\n\
     \n\
     1. Bring the exponent down as a *coefficient*.\n\
     2. Subtract one from the exponent.\n\
     \n\
     So \\(\\frac{d}{dx} x^2 = 2x\\). Run the animation below to watch the tangent line move.\n\
     {script}\n\
     As the point slides along the parabola, the slope of the tangent is always twice its x value.\n\
     {/script}\n\
     {manim}\n\
     from manim import *\n\
     \n\
     class PowerRule(Scene):\n\
     \x20   def construct(self):\n\
     \x20       axes = Axes(x_range=[-3, 3], y_range=[0, 9])\n\
     \x20       curve = axes.plot(lambda x: x ** 2)\n\
     \x20       self.play(Create(axes), Create(curve))\n\
     {/manim}",
];

/// Canned replies cycle so repeated questions see the whole set. Request ids start at 1.
pub fn canned_reply(request_id: u64) -> &'static str {
    CANNED_REPLIES[(request_id.saturating_sub(1) as usize) % CANNED_REPLIES.len()]
}
