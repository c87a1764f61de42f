use structopt::StructOpt;

use turtle::Options;

fn main() {
    turtle::Logger::init("TURTLE_LOG", "/tmp/turtle.log");

    let options = Options::from_args();

    turtle::run(options).unwrap();
}
