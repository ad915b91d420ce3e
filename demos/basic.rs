//! Basic example of using the maze engine

use puzzle_core::{render_list, render_map, render_no_solution, PuzzleMap, SearchMode, Solver};

const PUZZLE: &str = "\
2 5 7
// press `a` to open the A doors, `b` for B, `^` to drop back to colorless
@..a#..
.##A#.?
.#b.B.#
.#^##.#
.......
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let map: PuzzleMap = PUZZLE.parse()?;
    println!("Puzzle:");
    println!("{}", map);
    println!("State space: {} states\n", map.state_count());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for mode in [SearchMode::Queue, SearchMode::Stack] {
        let search = Solver::new(mode).solve(&map)?;
        println!(
            "--- {} search: discovered {}, expanded {} ---",
            mode, search.stats.discovered, search.stats.expanded
        );

        match search.path(&map)? {
            Some(path) => {
                println!("{} transitions, {} presses", path.transitions(), path.presses());
                render_list(&mut out, &path)?;
                render_map(&mut out, &map, &search.backtrace, &path)?;
            }
            None => render_no_solution(&mut out, &map, &search.backtrace)?,
        }
        println!();
    }

    // Remove the only button and the doors stay shut
    let locked: PuzzleMap = "1 3 4\n@...\n##A#\n...?\n".parse()?;
    let search = Solver::new(SearchMode::Queue).solve(&locked)?;
    render_no_solution(&mut out, &locked, &search.backtrace)?;

    Ok(())
}
