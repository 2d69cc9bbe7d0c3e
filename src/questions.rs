use crate::models::Question;

fn question(
    id: u32,
    prompt: &str,
    options: [&str; 4],
    correct_option: usize,
    explanation: &str,
) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option,
        explanation: explanation.to_string(),
    }
}

lazy_static::lazy_static! {
    pub static ref QUESTIONS: Vec<Question> = vec![
        question(
            1,
            "What defines the solution of a system of linear equations in two variables?",
            [
                "The point where the lines cross the X axis.",
                "The set of x and y values that satisfy both equations simultaneously.",
                "Any pair of numbers that add up to zero.",
                "The slope of the steepest line.",
            ],
            1,
            "The solution is the intersection of the lines: the values that make both equations true at the same time.",
        ),
        question(
            2,
            "In the elimination method, what is the main goal when adding the equations?",
            [
                "Find the value of the constant.",
                "Eliminate one of the variables to solve for the other.",
                "Graph both lines.",
                "Multiply both variables to get a product.",
            ],
            1,
            "Elimination matches the coefficients of one variable with opposite signs so that it cancels out when the equations are added.",
        ),
        question(
            3,
            "If the lines of a system of equations are parallel, how many solutions does the system have?",
            [
                "A unique solution.",
                "Two solutions.",
                "Infinitely many solutions.",
                "No solution.",
            ],
            3,
            "Parallel lines never meet, so no point satisfies both equations simultaneously.",
        ),
        question(
            4,
            "If the lines of a system coincide (they are the same line), what is the solution?",
            [
                "There is no solution.",
                "It has infinitely many solutions.",
                "The solution is (0,0).",
                "It has exactly two solutions.",
            ],
            1,
            "When the lines coincide every point on the line satisfies both equations, giving infinitely many solutions.",
        ),
        question(
            5,
            "In business administration, what does the 'break-even point' represent?",
            [
                "When costs exceed revenue.",
                "When all products in inventory are sold.",
                "The point where revenue equals total cost.",
                "The point where profit is maximal.",
            ],
            2,
            "At the break-even point the company neither gains nor loses money: Revenue = Cost.",
        ),
        question(
            6,
            "Given the cost function C(x) = 15x + 2000 and revenue R(x) = 20x, which equation finds the break-even point?",
            [
                "20x = 15x + 2000",
                "20x + 15x = 2000",
                "15x = 2000 - 20x",
                "x = 2000 / 20",
            ],
            0,
            "Break-even is found by equating revenue and cost: R(x) = C(x), so 20x = 15x + 2000.",
        ),
        question(
            7,
            "What is the DOMAIN of a function?",
            [
                "The set of all possible values of the dependent variable (y).",
                "The set of all possible values of the independent variable (x).",
                "The highest point of the graph.",
                "The intersection with the Y axis.",
            ],
            1,
            "The domain is every input value (x) for which the function is defined and produces a real number.",
        ),
        question(
            8,
            "For f(x) = √(x + 2), what restriction determines the domain?",
            [
                "x + 2 ≠ 0",
                "x + 2 < 0",
                "x + 2 ≥ 0",
                "x can be any real number.",
            ],
            2,
            "Inside an even root the radicand must be greater than or equal to zero for the result to be real.",
        ),
        question(
            9,
            "What is the domain of f(x) = √(x + 2)?",
            [
                "x ≥ 2",
                "x ≥ -2",
                "x > -2",
                "All reals except -2",
            ],
            1,
            "Solving x + 2 ≥ 0 gives x ≥ -2. In interval notation: [-2, ∞).",
        ),
        question(
            10,
            "What is the RANGE of a function?",
            [
                "The values of x that make the denominator zero.",
                "The set of resulting y values after substituting the domain.",
                "The set of positive integers.",
                "The distance between two points on the graph.",
            ],
            1,
            "The range is the set of every possible output (y value) the function can produce.",
        ),
        question(
            11,
            "If f(x) = 2x² - 5x + 1, what is f(3)?",
            ["1", "4", "10", "-2"],
            1,
            "Substituting x = 3: 2(3)² - 5(3) + 1 = 18 - 15 + 1 = 4.",
        ),
        question(
            12,
            "For a rational function, what condition must the denominator meet to determine the domain?",
            [
                "The denominator must be positive.",
                "The denominator cannot be zero.",
                "The denominator must equal the numerator.",
                "There are no restrictions on the denominator.",
            ],
            1,
            "Division by zero is undefined, so any x that makes the denominator zero is excluded from the domain.",
        ),
        question(
            13,
            "What is the standard form of a quadratic function?",
            [
                "f(x) = mx + b",
                "f(x) = ax² + bx + c, (with a ≠ 0)",
                "f(x) = |x|",
                "f(x) = √x",
            ],
            1,
            "A quadratic function is a second-degree polynomial: ax² + bx + c.",
        ),
        question(
            14,
            "If in f(x) = ax² + bx + c the value of 'a' is negative (a < 0), which way does the parabola open?",
            ["Upwards.", "To the right.", "Downwards.", "To the left."],
            2,
            "A negative leading coefficient makes the parabola open downwards with a maximum point.",
        ),
        question(
            15,
            "Which formula gives the x coordinate of a parabola's vertex?",
            ["x = -b / 2a", "x = b² - 4ac", "x = -b ± √Δ", "x = c / a"],
            0,
            "For ax² + bx + c the vertex lies at x = -b / (2a).",
        ),
        question(
            16,
            "Given the profit function P = -45p² + 1575p - 8750, what kind of graph does it describe?",
            [
                "An increasing straight line.",
                "A parabola opening downwards.",
                "A circle.",
                "A hyperbola.",
            ],
            1,
            "It is quadratic with a negative leading coefficient (-45), so it is a parabola opening downwards.",
        ),
        question(
            17,
            "Which equation represents a circle with center (h, k) and radius r?",
            [
                "y = mx + b",
                "(x - h)² + (y - k)² = r²",
                "y = ax² + bx + c",
                "x² - y² = r",
            ],
            1,
            "The standard circle equation sets the sum of squared distances to the center equal to the squared radius.",
        ),
        question(
            18,
            "What is the main geometric feature of the graph of the absolute value function f(x) = |x|?",
            [
                "It is a horizontal straight line.",
                "It is U-shaped.",
                "It is V-shaped.",
                "It is an S-shaped curve.",
            ],
            2,
            "The absolute value function is two rays leaving the origin, forming a 'V'.",
        ),
        question(
            19,
            "If f(x) = 1/(x-2) and g(x) = √x, what is the domain of (f ∘ g)(x)?",
            ["x ≥ 0", "x ≠ 2", "x ≥ 0 and x ≠ 4", "All reals."],
            2,
            "g requires x ≥ 0. In f(g(x)) = 1/(√x - 2) the denominator cannot vanish, so √x ≠ 2 and x ≠ 4. Domain: [0, 4) ∪ (4, ∞).",
        ),
        question(
            20,
            "To find the inverse function f⁻¹(x), which step is essential regarding the variables?",
            [
                "Square both variables.",
                "Swap x and y, then solve for y.",
                "Set y = 0.",
                "Multiply the function by -1.",
            ],
            1,
            "The inverse reflects the graph over y = x; algebraically that means swapping x and y and solving for the new y.",
        ),
    ];
}
